//! Admin payloads: users, alerts and counters.

use super::{non_empty, opt_string_or_number};
use serde::{Deserialize, Serialize};

/// Placeholder for a missing user field.
pub const MISSING_FIELD: &str = "-";

/// One user of `GET /api/users`. `email` is the row key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRow {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserRow {
    pub fn name_label(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(MISSING_FIELD)
    }

    pub fn role_label(&self) -> &str {
        non_empty(self.role.as_deref()).unwrap_or(MISSING_FIELD)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsersEnvelope {
    #[serde(default)]
    pub users: Vec<UserRow>,
}

/// `POST /api/users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// `PUT /api/users`: partial update keyed by email. Absent fields are left
/// untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    /// Build an update from prompt answers; blank or cancelled answers are omitted.
    pub fn from_answers(
        email: &str,
        name: Option<String>,
        role: Option<String>,
        password: Option<String>,
    ) -> Self {
        let keep = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Self {
            email: email.to_string(),
            name: keep(name),
            role: keep(role),
            password: keep(password),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none() && self.password.is_none()
    }
}

/// One alert of `GET /api/alerts`. Rendered as delivered, without placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertRow {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub ward: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub coordinates: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl AlertRow {
    /// Cells in column order; nulls render empty.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.ward.as_deref().unwrap_or_default(),
            self.location.as_deref().unwrap_or_default(),
            self.coordinates.as_deref().unwrap_or_default(),
            self.date.as_deref().unwrap_or_default(),
            self.severity.as_deref().unwrap_or_default(),
            self.status.as_deref().unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertsEnvelope {
    #[serde(default)]
    pub alerts: Vec<AlertRow>,
}

/// `GET /api/admin-dashboard`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminStats {
    #[serde(default)]
    pub users_count: u64,
    #[serde(default)]
    pub reports_count: u64,
    #[serde(default)]
    pub grievances_count: u64,
}

/// `GET /api/dashboard_stats`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_detections: u64,
    #[serde(default)]
    pub pending_alerts: u64,
    #[serde(default)]
    pub resolved_cases: u64,
}
