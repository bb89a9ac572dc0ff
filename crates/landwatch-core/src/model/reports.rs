//! Report listing and generation payloads.

use super::{non_empty, opt_string_or_number, string_or_number};
use serde::{Deserialize, Serialize};

/// Placeholder for a report without a ward.
pub const ALL_WARDS: &str = "All";

/// Placeholder for a missing date.
pub const NO_DATE: &str = "-";

/// Separator used when a report carries several detail entries.
pub const DETAILS_SEPARATOR: &str = " / ";

/// A report's `details`: one string or a sequence of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReportDetails {
    One(String),
    Many(Vec<String>),
}

impl ReportDetails {
    /// Display text: sequences are joined with `" / "`.
    pub fn joined(&self) -> String {
        match self {
            ReportDetails::One(s) => s.clone(),
            ReportDetails::Many(parts) => parts.join(DETAILS_SEPARATOR),
        }
    }
}

/// One row of `GET /api/reports`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRow {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub ward: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub details: Option<ReportDetails>,
}

impl ReportRow {
    pub fn ward_label(&self) -> &str {
        non_empty(self.ward.as_deref()).unwrap_or(ALL_WARDS)
    }

    pub fn date_label(&self) -> &str {
        non_empty(self.date.as_deref()).unwrap_or(NO_DATE)
    }

    pub fn details_label(&self) -> String {
        self.details
            .as_ref()
            .map(ReportDetails::joined)
            .unwrap_or_default()
    }
}

/// Optional filters for the report list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub ward: Option<String>,
    pub date: Option<String>,
}

impl ReportFilter {
    /// Build a filter from raw field values; blank values are dropped.
    pub fn from_fields(ward: Option<&str>, date: Option<&str>) -> Self {
        Self {
            ward: non_empty(ward).map(|w| w.trim().to_string()),
            date: non_empty(date).map(|d| d.trim().to_string()),
        }
    }

    /// Query parameters in request order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ward) = &self.ward {
            pairs.push(("ward", ward.clone()));
        }
        if let Some(date) = &self.date {
            pairs.push(("date", date.clone()));
        }
        pairs
    }
}

/// `POST /api/reports/generate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateReportRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Result of report generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateReportResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_details_sequence_is_joined() {
        let row: ReportRow =
            serde_json::from_str(r#"{"id": "r1", "type": "pdf", "details": ["a", "b"]}"#).unwrap();
        assert_eq!(row.details_label(), "a / b");
    }

    #[test]
    fn test_details_scalar_is_verbatim() {
        let row: ReportRow =
            serde_json::from_str(r#"{"id": "r1", "type": "pdf", "details": "a"}"#).unwrap();
        assert_eq!(row.details_label(), "a");
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let row: ReportRow = serde_json::from_str(r#"{"id": 7, "type": "csv", "ward": null}"#).unwrap();
        assert_eq!(row.id, "7");
        assert_eq!(row.ward_label(), "All");
        assert_eq!(row.date_label(), "-");
        assert_eq!(row.details_label(), "");
    }

    #[test]
    fn test_empty_date_uses_placeholder() {
        let row: ReportRow = serde_json::from_str(r#"{"id": "x", "type": "csv", "date": ""}"#).unwrap();
        assert_eq!(row.date_label(), "-");
    }

    #[test]
    fn test_filter_drops_blank_values() {
        let filter = ReportFilter::from_fields(Some(" 12 "), Some(""));
        assert_eq!(filter.query_pairs(), vec![("ward", "12".to_string())]);
        assert!(ReportFilter::from_fields(None, None).query_pairs().is_empty());
    }
}
