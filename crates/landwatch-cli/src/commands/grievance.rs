//! `landwatch grievance submit|list|leaderboard` and `landwatch contact`.

use super::{Env, bound, finish};
use crate::console::ConsolePage;
use landwatch_core::model::{ContactRequest, GrievanceRequest};
use landwatch_ui::sections::GrievancesSection;
use landwatch_ui::sections::admin::GRIEVANCES_TABLE;
use landwatch_ui::sections::grievance::*;
use std::sync::Arc;

pub async fn submit(env: &Env, grievance: &GrievanceRequest) -> anyhow::Result<()> {
    let page = Arc::new(
        ConsolePage::new()
            .with_elements(&[GRIEVANCE_FORM, GRIEVANCE_SUCCESS, GRIEVANCE_ERROR])
            .with_field(GRIEVANCE_NAME, Some(grievance.name.as_str()))
            .with_field(GRIEVANCE_EMAIL, Some(grievance.email.as_str()))
            .with_field(GRIEVANCE_WARD, Some(grievance.ward.as_str()))
            .with_field(GRIEVANCE_LOCATION, Some(grievance.location.as_str()))
            .with_field(GRIEVANCE_DESCRIPTION, Some(grievance.description.as_str())),
    );
    let cx = env.context(&page);
    bound(GrievanceSection::bind(&cx), "grievance")?
        .submit()
        .await;
    finish(&cx, "grievance")
}

/// Every submitted grievance, newest first.
pub async fn list(env: &Env) -> anyhow::Result<()> {
    let page = Arc::new(ConsolePage::new().with_element(GRIEVANCES_TABLE));
    let cx = env.context(&page);
    bound(GrievancesSection::bind(&cx), "grievances")?
        .load()
        .await;
    finish(&cx, "grievances")
}

pub async fn leaderboard(env: &Env) -> anyhow::Result<()> {
    let page = Arc::new(ConsolePage::new().with_element(LEADERBOARD_TABLE));
    let cx = env.context(&page);
    bound(LeaderboardSection::bind(&cx), "leaderboard")?
        .load()
        .await;
    finish(&cx, "leaderboard")
}

pub async fn contact(env: &Env, request: &ContactRequest) -> anyhow::Result<()> {
    let page = Arc::new(
        ConsolePage::new()
            .with_elements(&[CONTACT_FORM, CONTACT_SUCCESS, CONTACT_ERROR])
            .with_field(CONTACT_NAME, Some(request.name.as_str()))
            .with_field(CONTACT_EMAIL, Some(request.email.as_str()))
            .with_field(CONTACT_SUBJECT, Some(request.subject.as_str()))
            .with_field(CONTACT_MESSAGE, Some(request.message.as_str())),
    );
    let cx = env.context(&page);
    bound(ContactSection::bind(&cx), "contact")?.submit().await;
    finish(&cx, "contact")
}
