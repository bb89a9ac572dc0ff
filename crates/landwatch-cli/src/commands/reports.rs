//! `landwatch reports list|generate`.

use super::{Env, bound, finish};
use crate::console::ConsolePage;
use landwatch_ui::sections::reports::*;
use std::sync::Arc;

pub async fn list(env: &Env, ward: Option<&str>, date: Option<&str>) -> anyhow::Result<()> {
    let page = Arc::new(
        ConsolePage::new()
            .with_element(REPORTS_TABLE)
            .with_field(WARD_FILTER, ward)
            .with_field(DATE_FILTER, date),
    );
    let cx = env.context(&page);
    bound(ReportsSection::bind(&cx), "reports")?.load().await;
    finish(&cx, "reports")
}

pub async fn generate(env: &Env, kind: Option<&str>) -> anyhow::Result<()> {
    let page = Arc::new(
        ConsolePage::new()
            .with_elements(&[GENERATE_BUTTON, REPORTS_TABLE])
            .with_field(REPORT_TYPE, kind),
    );
    let cx = env.context(&page);
    bound(ReportGenerateSection::bind(&cx), "report generation")?
        .generate()
        .await;
    finish(&cx, "report generation")
}
