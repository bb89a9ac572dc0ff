//! Report list with ward/date filters, and report generation.

use super::SectionContext;
use crate::templates::{REPORT_COLUMNS, error_row, report_row, rows};
use landwatch_core::model::ReportFilter;

pub const REPORTS_TABLE: &str = "reportsTableBody";
pub const WARD_FILTER: &str = "wardFilter";
pub const DATE_FILTER: &str = "dateFilter";

pub const GENERATE_BUTTON: &str = "generateReportBtn";
pub const REPORT_TYPE: &str = "reportType";

/// Report type used when none is selected.
pub const DEFAULT_REPORT_TYPE: &str = "pdf";

#[derive(Clone)]
pub struct ReportsSection {
    cx: SectionContext,
}

impl ReportsSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(REPORTS_TABLE).map(|cx| Self { cx })
    }

    /// Fetch with the current filter values and replace the table body.
    /// Also the filter button's handler.
    pub async fn load(&self) {
        let page = &self.cx.page;
        let filter = ReportFilter::from_fields(
            page.field_value(WARD_FILTER).as_deref(),
            page.field_value(DATE_FILTER).as_deref(),
        );

        let html = match self.cx.client.reports(&filter).await {
            Ok(reports) => {
                tracing::debug!(count = reports.len(), "Reports loaded");
                rows(&reports, report_row)
            }
            Err(e) => {
                self.cx.failed("load reports", &e);
                error_row(
                    REPORT_COLUMNS,
                    &format!("Failed to load reports: {}", e.user_message()),
                )
            }
        };
        page.set_html(REPORTS_TABLE, &html);
    }
}

pub struct ReportGenerateSection {
    cx: SectionContext,
    list: ReportsSection,
}

impl ReportGenerateSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(GENERATE_BUTTON).map(|cx| Self {
            list: ReportsSection { cx: cx.clone() },
            cx,
        })
    }

    pub async fn generate(&self) {
        let page = &self.cx.page;
        let selected = page.field(REPORT_TYPE);
        let kind = match selected.trim() {
            "" => DEFAULT_REPORT_TYPE,
            kind => kind,
        };

        match self.cx.client.generate_report(kind).await {
            Ok(response) => {
                let filename = response.filename.as_deref().unwrap_or("report");
                page.alert(&format!("Report generated: {filename}"));
                if page.has_element(REPORTS_TABLE) {
                    self.list.load().await;
                }
            }
            Err(e) => {
                self.cx.failed("generate report", &e);
                let message = e
                    .server_message()
                    .unwrap_or_else(|| "Failed to generate report".to_string());
                page.alert(&message);
            }
        }
    }
}
