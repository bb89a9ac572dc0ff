//! Wire types for the backend's JSON contracts.
//!
//! These types are rendered, never owned: the backend is the source of truth
//! and every reload re-fetches. Optional fields stay `Option` so the render
//! layer can substitute its placeholders.

pub mod admin;
pub mod auth;
pub mod geo;
pub mod grievance;
pub mod imagery;
pub mod reports;

pub use admin::{AdminStats, AlertRow, AlertsEnvelope, DashboardStats, NewUser, UserRow, UserUpdate, UsersEnvelope};
pub use auth::{ForgotPasswordRequest, LanguageRequest, LoginRequest, LoginResponse, RegisterRequest, Translations};
pub use geo::{FeatureCollection, FeatureProperties, GeoFeature};
pub use grievance::{ContactRequest, GrievanceRequest, GrievanceRow, LeaderboardEnvelope, LeaderboardItem};
pub use imagery::{
    find_tagged, Anomaly, DetectionResult, Hotspot, HotspotsEnvelope, ImageItem, ImageTag, ManualFetchRequest, OwnerInfo,
};
pub use reports::{GenerateReportRequest, GenerateReportResponse, ReportDetails, ReportFilter, ReportRow};

use serde::{Deserialize, Deserializer};

/// Treat empty or whitespace-only strings as absent.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept a JSON string, number or null as an optional string.
pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accept a JSON number or numeric string; anything else is absent.
pub(crate) fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept a JSON string or number as a string; null becomes empty.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string_or_number(deserializer)?.unwrap_or_default())
}
