//! `landwatch images`, `fetch`, `detect`, `hotspots`, `map` and `stats`.

use super::{Env, bound, finish};
use crate::console::ConsolePage;
use landwatch_ui::sections::admin::{GRIEVANCES_COUNT, REPORTS_COUNT, USERS_COUNT};
use landwatch_ui::sections::dashboard::*;
use landwatch_ui::sections::map::MAP;
use landwatch_ui::sections::{AdminStatsSection, MapSection};
use std::sync::Arc;

pub async fn images(env: &Env) -> anyhow::Result<()> {
    let page = Arc::new(ConsolePage::new().with_elements(&[OLD_IMAGE, NEW_IMAGE]));
    let cx = env.context(&page);
    bound(ThumbnailsSection::bind(&cx), "thumbnails")?
        .load()
        .await;
    finish(&cx, "images")
}

pub async fn manual_fetch(env: &Env, start: &str, end: &str) -> anyhow::Result<()> {
    let page = Arc::new(
        ConsolePage::new()
            .with_elements(&[MANUAL_FETCH_FORM, OLD_IMAGE, NEW_IMAGE])
            .with_field(START_DATE, Some(start))
            .with_field(END_DATE, Some(end)),
    );
    let cx = env.context(&page);
    bound(ManualFetchSection::bind(&cx), "manual fetch")?
        .submit()
        .await;
    finish(&cx, "fetch")
}

pub async fn detect(env: &Env) -> anyhow::Result<()> {
    let page = Arc::new(ConsolePage::new().with_element(RUN_DETECTION));
    let cx = env.context(&page);
    bound(DetectionSection::bind(&cx), "detection")?.run().await;
    finish(&cx, "detection")
}

pub async fn hotspots(env: &Env) -> anyhow::Result<()> {
    let page = Arc::new(ConsolePage::new().with_element(HOTSPOTS_TABLE));
    let cx = env.context(&page);
    bound(HotspotsSection::bind(&cx), "hotspots")?.load().await;
    finish(&cx, "hotspots")
}

pub async fn map(env: &Env) -> anyhow::Result<()> {
    let page = Arc::new(ConsolePage::new().with_element(MAP));
    let cx = env.context(&page);
    bound(MapSection::bind(&cx), "map")?.load().await;
    finish(&cx, "map")
}

/// Public counters, or the admin counters with `admin`.
pub async fn stats(env: &Env, admin: bool) -> anyhow::Result<()> {
    if admin {
        let page = Arc::new(
            ConsolePage::new().with_elements(&[USERS_COUNT, REPORTS_COUNT, GRIEVANCES_COUNT]),
        );
        let cx = env.context(&page);
        bound(AdminStatsSection::bind(&cx), "admin stats")?
            .load()
            .await;
        finish(&cx, "admin stats")
    } else {
        let page = Arc::new(
            ConsolePage::new().with_elements(&[TOTAL_DETECTIONS, PENDING_ALERTS, RESOLVED_CASES]),
        );
        let cx = env.context(&page);
        bound(PublicStatsSection::bind(&cx), "dashboard stats")?
            .load()
            .await;
        finish(&cx, "dashboard stats")
    }
}
