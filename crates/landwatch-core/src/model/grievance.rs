//! Citizen grievance payloads.

use super::{non_empty, opt_string_or_number};
use crate::model::admin::MISSING_FIELD;
use serde::{Deserialize, Serialize};

/// `POST /api/grievance`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrievanceRequest {
    pub name: String,
    pub email: String,
    pub ward: String,
    pub location: String,
    pub description: String,
}

/// One stored grievance of `GET /api/grievances`, newest first.
///
/// The attached image is not listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrievanceRow {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub ward: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub timestamp: Option<String>,
}

impl GrievanceRow {
    /// Cells in column order; missing values show `-`.
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.name,
            &self.email,
            &self.ward,
            &self.location,
            &self.description,
            &self.timestamp,
        ]
        .map(|v| non_empty(v.as_deref()).unwrap_or(MISSING_FIELD))
    }
}

/// `POST /api/contact`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// One entry of the grievance leaderboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub count: u64,
}

impl LeaderboardItem {
    /// Name, or the email when the reporter gave none.
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(&self.email)
    }
}

/// `GET /api/grievance/leaderboard`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEnvelope {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub items: Vec<LeaderboardItem>,
    #[serde(default)]
    pub error: Option<String>,
}
