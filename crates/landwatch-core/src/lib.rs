//! # landwatch-core
//!
//! Types shared by every Landwatch crate:
//! - configuration (`LandwatchConfig`, loaded from TOML)
//! - the session context holding the login credentials
//! - wire types for the backend's JSON contracts (reports, users, alerts,
//!   imagery, detections, GeoJSON, grievances)

pub mod config;
pub mod error;
pub mod model;
pub mod session;

pub use config::{BackendConfig, LandwatchConfig, RoutesConfig, UiConfig};
pub use error::ConfigError;
pub use session::{Role, SessionContext, SessionCredentials};
