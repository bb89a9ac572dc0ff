//! Citizen grievances, the reporter leaderboard and the contact form.

use super::SectionContext;
use crate::templates::{LEADERBOARD_COLUMNS, error_row, leaderboard_row};
use landwatch_core::model::{ContactRequest, GrievanceRequest};

pub const GRIEVANCE_FORM: &str = "grievanceForm";
pub const GRIEVANCE_NAME: &str = "grievanceName";
pub const GRIEVANCE_EMAIL: &str = "grievanceEmail";
pub const GRIEVANCE_WARD: &str = "grievanceWard";
pub const GRIEVANCE_LOCATION: &str = "grievanceLocation";
pub const GRIEVANCE_DESCRIPTION: &str = "grievanceDescription";
pub const GRIEVANCE_SUCCESS: &str = "grievanceSuccess";
pub const GRIEVANCE_ERROR: &str = "grievanceError";

pub const LEADERBOARD_TABLE: &str = "leaderboardTableBody";

pub const CONTACT_FORM: &str = "contactForm";
pub const CONTACT_NAME: &str = "contactName";
pub const CONTACT_EMAIL: &str = "contactEmail";
pub const CONTACT_SUBJECT: &str = "contactSubject";
pub const CONTACT_MESSAGE: &str = "contactMessage";
pub const CONTACT_SUCCESS: &str = "contactSuccess";
pub const CONTACT_ERROR: &str = "contactError";

pub struct GrievanceSection {
    cx: SectionContext,
}

impl GrievanceSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(GRIEVANCE_FORM).map(|cx| Self { cx })
    }

    pub async fn submit(&self) {
        let page = &self.cx.page;
        page.set_visible(GRIEVANCE_SUCCESS, false);
        page.set_visible(GRIEVANCE_ERROR, false);

        let grievance = GrievanceRequest {
            name: page.field(GRIEVANCE_NAME),
            email: page.field(GRIEVANCE_EMAIL),
            ward: page.field(GRIEVANCE_WARD),
            location: page.field(GRIEVANCE_LOCATION),
            description: page.field(GRIEVANCE_DESCRIPTION),
        };

        match self.cx.client.submit_grievance(&grievance).await {
            Ok(message) => {
                page.show_banner(GRIEVANCE_SUCCESS, &message);
                page.reset_form(GRIEVANCE_FORM);
            }
            Err(e) => {
                self.cx.failed("submit grievance", &e);
                page.show_banner(GRIEVANCE_ERROR, &e.user_message());
            }
        }
    }
}

pub struct LeaderboardSection {
    cx: SectionContext,
}

impl LeaderboardSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(LEADERBOARD_TABLE).map(|cx| Self { cx })
    }

    pub async fn load(&self) {
        let html: String = match self.cx.client.grievance_leaderboard().await {
            Ok(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| leaderboard_row(i + 1, item))
                .collect(),
            Err(e) => {
                self.cx.failed("load leaderboard", &e);
                error_row(
                    LEADERBOARD_COLUMNS,
                    &format!("Failed to load leaderboard: {}", e.user_message()),
                )
            }
        };
        self.cx.page.set_html(LEADERBOARD_TABLE, &html);
    }
}

pub struct ContactSection {
    cx: SectionContext,
}

impl ContactSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(CONTACT_FORM).map(|cx| Self { cx })
    }

    pub async fn submit(&self) {
        let page = &self.cx.page;
        page.set_visible(CONTACT_SUCCESS, false);
        page.set_visible(CONTACT_ERROR, false);

        let request = ContactRequest {
            name: page.field(CONTACT_NAME),
            email: page.field(CONTACT_EMAIL),
            subject: page.field(CONTACT_SUBJECT),
            message: page.field(CONTACT_MESSAGE),
        };

        match self.cx.client.contact(&request).await {
            Ok(message) => {
                page.show_banner(CONTACT_SUCCESS, &message);
                page.reset_form(CONTACT_FORM);
            }
            Err(e) => {
                self.cx.failed("submit contact form", &e);
                page.show_banner(CONTACT_ERROR, &e.user_message());
            }
        }
    }
}
