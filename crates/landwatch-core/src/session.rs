//! Session context.
//!
//! Holds the credentials returned by a successful login. The context is a
//! cheap cloneable handle: the login section writes it, the API client reads
//! it to authenticate later requests. Token and role are always stored
//! together.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

/// Account role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Officer,
    Public,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Officer => "officer",
            Role::Public => "public",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "officer" => Ok(Role::Officer),
            "public" => Ok(Role::Public),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Credentials issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredentials {
    pub token: String,
    pub role: Role,
}

impl SessionCredentials {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }
}

/// Shared, session-scoped credential slot.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<SessionCredentials>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store token and role in one write.
    pub fn set(&self, credentials: SessionCredentials) {
        tracing::debug!(role = %credentials.role, "Session credentials stored");
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(credentials);
    }

    /// Current credentials, if logged in.
    pub fn credentials(&self) -> Option<SessionCredentials> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Bearer token to attach to requests. Empty tokens are not sent.
    pub fn bearer_token(&self) -> Option<String> {
        self.credentials()
            .map(|c| c.token)
            .filter(|t| !t.is_empty())
    }

    pub fn role(&self) -> Option<Role> {
        self.credentials().map(|c| c.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials().is_some()
    }

    /// Forget the credentials (end of session).
    pub fn clear(&self) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Officer ".parse::<Role>().unwrap(), Role::Officer);
        assert_eq!(Role::Public.to_string(), "public");
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Officer).unwrap();
        assert_eq!(json, "\"officer\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert!(role.is_admin());
    }

    #[test]
    fn test_context_clones_share_state() {
        let ctx = SessionContext::new();
        let reader = ctx.clone();
        assert!(!reader.is_authenticated());

        ctx.set(SessionCredentials::new("tok-1", Role::Officer));
        assert_eq!(reader.role(), Some(Role::Officer));
        assert_eq!(reader.bearer_token().as_deref(), Some("tok-1"));

        reader.clear();
        assert!(ctx.credentials().is_none());
    }

    #[test]
    fn test_empty_token_is_not_a_bearer() {
        let ctx = SessionContext::new();
        ctx.set(SessionCredentials::new("", Role::Public));
        assert!(ctx.is_authenticated());
        assert!(ctx.bearer_token().is_none());
    }
}
