//! The fixed, versionless endpoint set of the backend.

use crate::request::Method;
use std::fmt;

/// A method + path pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn get(path: &'static str) -> Self {
        Self { method: Method::Get, path }
    }

    pub const fn post(path: &'static str) -> Self {
        Self { method: Method::Post, path }
    }

    pub const fn put(path: &'static str) -> Self {
        Self { method: Method::Put, path }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self { method: Method::Delete, path }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

// =============================================================================
// Auth and language
// =============================================================================

pub const SET_LANGUAGE: Endpoint = Endpoint::post("/set_language");
pub const TRANSLATIONS: Endpoint = Endpoint::get("/api/translations");
pub const REGISTER: Endpoint = Endpoint::post("/api/register");
pub const LOGIN: Endpoint = Endpoint::post("/api/login");
pub const FORGOT_PASSWORD: Endpoint = Endpoint::post("/api/forgot-password");

// =============================================================================
// Imagery and detection
// =============================================================================

pub const IMAGES: Endpoint = Endpoint::get("/api/images");
pub const MANUAL_FETCH: Endpoint = Endpoint::post("/api/fetch/manual");
pub const DETECT: Endpoint = Endpoint::get("/api/detect");
pub const HOTSPOTS: Endpoint = Endpoint::get("/api/detect/hotspots");

// =============================================================================
// Reports and map
// =============================================================================

pub const REPORTS: Endpoint = Endpoint::get("/api/reports");
pub const GENERATE_REPORT: Endpoint = Endpoint::post("/api/reports/generate");
pub const REPORT_DOWNLOAD_PATH: &str = "/api/reports/download";
pub const DETECTIONS_GEOJSON: Endpoint = Endpoint::get("/api/detections.geojson");

// =============================================================================
// Admin and dashboards
// =============================================================================

pub const ADMIN_STATS: Endpoint = Endpoint::get("/api/admin-dashboard");
pub const DASHBOARD_STATS: Endpoint = Endpoint::get("/api/dashboard_stats");
pub const ALERTS: Endpoint = Endpoint::get("/api/alerts");
pub const USERS: Endpoint = Endpoint::get("/api/users");
pub const ADD_USER: Endpoint = Endpoint::post("/api/users");
pub const UPDATE_USER: Endpoint = Endpoint::put("/api/users");
pub const DELETE_USER: Endpoint = Endpoint::delete("/api/users");

// =============================================================================
// Grievances, contact and health
// =============================================================================

pub const GRIEVANCE: Endpoint = Endpoint::post("/api/grievance");
pub const GRIEVANCES: Endpoint = Endpoint::get("/api/grievances");
pub const CONTACT: Endpoint = Endpoint::post("/api/contact");
pub const GRIEVANCE_LEADERBOARD: Endpoint = Endpoint::get("/api/grievance/leaderboard");
pub const HEALTH: Endpoint = Endpoint::get("/api/health");

/// Download link for a stored report.
pub fn report_download_href(id: &str) -> String {
    format!("{REPORT_DOWNLOAD_PATH}?id={}", urlencoding::encode(id))
}
