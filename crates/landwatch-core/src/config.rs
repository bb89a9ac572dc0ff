//! Configuration for the Landwatch UI layer.
//!
//! Configuration is loaded from a TOML file (`landwatch.toml` by default, or
//! the path in `LANDWATCH_CONFIG`). Every field has a default so a missing
//! file yields a usable configuration pointed at a local backend.
//!
//! ```toml
//! [backend]
//! base_url = "http://127.0.0.1:5000"
//! timeout_secs = 30
//!
//! [routes]
//! admin_page = "/admin_dashboard"
//! default_page = "/"
//! login_page = "/login"
//!
//! [ui]
//! redirect_delay_ms = 2000
//! push_event = "new_detection"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "LANDWATCH_CONFIG";

/// Environment variable overriding `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "LANDWATCH_BACKEND_URL";

const DEFAULT_CONFIG_FILE: &str = "landwatch.toml";

/// Complete Landwatch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LandwatchConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Navigation targets used by the auth sections.
    #[serde(default)]
    pub routes: RoutesConfig,

    /// UI behaviour knobs.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL every endpoint path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Pages the auth sections navigate to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutesConfig {
    /// Landing page for the `admin` role.
    #[serde(default = "default_admin_page")]
    pub admin_page: String,

    /// Landing page for every other role.
    #[serde(default = "default_default_page")]
    pub default_page: String,

    /// Login page, target of the post-registration redirect.
    #[serde(default = "default_login_page")]
    pub login_page: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            admin_page: default_admin_page(),
            default_page: default_default_page(),
            login_page: default_login_page(),
        }
    }
}

/// UI behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Delay before the post-registration redirect.
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,

    /// Push event name that triggers an alerts reload.
    #[serde(default = "default_push_event")]
    pub push_event: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay_ms(),
            push_event: default_push_event(),
        }
    }
}

impl UiConfig {
    /// Redirect delay as a `Duration`.
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl LandwatchConfig {
    /// Load configuration from an explicit file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `LANDWATCH_CONFIG` or `landwatch.toml`.
    ///
    /// A missing default file is not an error; defaults are used instead.
    /// `LANDWATCH_BACKEND_URL` overrides the backend URL in either case.
    pub fn load() -> Result<Self, ConfigError> {
        let (path, explicit) = config_path();
        let mut config = if explicit || path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };

        if let Ok(url) = env::var(BACKEND_URL_ENV) {
            config.backend.base_url = url;
            config.validate()?;
        }

        Ok(config)
    }

    /// Reject values no request could be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let raw = self.backend.base_url.trim();
        if raw.is_empty() {
            return Err(ConfigError::Invalid("backend.base_url is empty".to_string()));
        }
        let url = Url::parse(raw).map_err(|e| {
            ConfigError::Invalid(format!("backend.base_url '{raw}' is not a URL: {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ConfigError::Invalid(format!(
                "backend.base_url must be an http(s) URL with a host, got '{raw}'"
            )));
        }
        Ok(())
    }
}

fn config_path() -> (PathBuf, bool) {
    match env::var(CONFIG_PATH_ENV) {
        Ok(p) => (PathBuf::from(p), true),
        Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_admin_page() -> String {
    "/admin_dashboard".to_string()
}

fn default_default_page() -> String {
    "/".to_string()
}

fn default_login_page() -> String {
    "/login".to_string()
}

fn default_redirect_delay_ms() -> u64 {
    2000
}

fn default_push_event() -> String {
    "new_detection".to_string()
}
