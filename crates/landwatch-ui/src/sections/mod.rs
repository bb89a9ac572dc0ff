//! Page sections.
//!
//! Each section owns one subtree of the page. `bind` checks the section's
//! guard element and returns `None` when the page lacks it, so a section
//! that is not on the page never binds and never issues a request.
//! Handlers catch every error and render it locally; the context counts
//! them so a caller can tell that something went wrong.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod grievance;
pub mod map;
pub mod reports;

pub use admin::{AdminStatsSection, AlertsSection, GrievancesSection, UsersSection};
pub use auth::{
    ForgotPasswordSection, LanguageSection, LoginSection, RegisterSection, TranslationsSection,
};
pub use dashboard::{
    DetectionSection, HotspotsSection, ManualFetchSection, PublicStatsSection, ThumbnailsSection,
};
pub use grievance::{ContactSection, GrievanceSection, LeaderboardSection};
pub use map::MapSection;
pub use reports::{ReportGenerateSection, ReportsSection};

use crate::page::Page;
use landwatch_client::{ApiClient, ClientError};
use landwatch_core::LandwatchConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What every section is built from.
///
/// Clones share the failure count.
#[derive(Clone)]
pub struct SectionContext {
    pub client: ApiClient,
    pub page: Arc<dyn Page>,
    pub config: Arc<LandwatchConfig>,
    failures: Arc<AtomicUsize>,
}

impl SectionContext {
    pub fn new(client: ApiClient, page: Arc<dyn Page>, config: Arc<LandwatchConfig>) -> Self {
        Self {
            client,
            page,
            config,
            failures: Arc::default(),
        }
    }

    /// Failed requests so far, across every section bound from this context.
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Record a failure the section has already rendered (or chose not to).
    pub(crate) fn failed(&self, action: &str, error: &ClientError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(action, status = ?error.status(), error = %error, "Section request failed");
    }

    /// Guard check: the context, if the page has the element.
    pub(crate) fn guard(&self, id: &str) -> Option<Self> {
        if self.page.has_element(id) {
            Some(self.clone())
        } else {
            tracing::trace!(element = id, "Section not on page");
            None
        }
    }
}
