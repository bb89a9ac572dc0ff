//! Auth and language payloads.

use crate::session::Role;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `POST /api/register`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// `POST /api/login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Successful login payload.
///
/// `token` is absent on backends that issue no token; the session then holds
/// an empty token alongside the role. `role` is echoed back as stored at
/// registration, so it is kept as text and parsed leniently.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// The returned role, if it names a known one.
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

/// `POST /api/forgot-password`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// `POST /set_language`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageRequest {
    pub language: String,
}

/// `GET /api/translations`: interface texts keyed by translation key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Translations(pub BTreeMap<String, Value>);

impl Translations {
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// String entries in key order. Non-string values are skipped.
    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|text| (key.as_str(), text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_without_token() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"success": true, "role": "officer"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.token, None);
        assert_eq!(resp.parsed_role(), Some(Role::Officer));
    }

    #[test]
    fn test_login_response_role_is_lenient() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"success": true, "role": "Admin"}"#).unwrap();
        assert_eq!(resp.parsed_role(), Some(Role::Admin));

        let resp: LoginResponse =
            serde_json::from_str(r#"{"success": true, "role": "supervisor"}"#).unwrap();
        assert_eq!(resp.role.as_deref(), Some("supervisor"));
        assert_eq!(resp.parsed_role(), None);
    }

    #[test]
    fn test_translations_skip_non_text() {
        let translations: Translations = serde_json::from_str(
            r#"{"hero_title": "Protecting Land Rights with", "alerts": "Alerts", "version": 2}"#,
        )
        .unwrap();
        assert_eq!(translations.text("alerts"), Some("Alerts"));
        assert_eq!(translations.text("version"), None);
        assert_eq!(
            translations.texts().collect::<Vec<_>>(),
            vec![("alerts", "Alerts"), ("hero_title", "Protecting Land Rights with")]
        );
    }
}
