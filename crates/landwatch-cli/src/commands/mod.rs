//! Command implementations. Each command builds a console page holding the
//! section's markup, binds the section and fires the matching handler.

pub mod admin;
pub mod auth;
pub mod grievance;
pub mod imagery;
pub mod reports;

use crate::console::ConsolePage;
use anyhow::Context;
use landwatch_client::ApiClient;
use landwatch_core::{LandwatchConfig, SessionContext};
use landwatch_ui::SectionContext;
use std::sync::Arc;

/// Configuration and client shared by every command.
pub struct Env {
    pub config: Arc<LandwatchConfig>,
    pub client: ApiClient,
}

impl Env {
    pub fn new(config: LandwatchConfig, session: SessionContext) -> anyhow::Result<Self> {
        let client = ApiClient::from_config(&config.backend, session)
            .context("Failed to build HTTP client")?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }

    /// Section context over a console page.
    pub fn context(&self, page: &Arc<ConsolePage>) -> SectionContext {
        SectionContext::new(self.client.clone(), page.clone(), self.config.clone())
    }
}

/// Bind a section or fail with the section's name.
pub(crate) fn bound<T>(section: Option<T>, name: &str) -> anyhow::Result<T> {
    section.with_context(|| format!("{name} section is not on the page"))
}

/// Fail the command if any request failed. The section has already printed
/// the error; this only sets the exit status.
pub(crate) fn finish(cx: &SectionContext, name: &str) -> anyhow::Result<()> {
    match cx.failure_count() {
        0 => Ok(()),
        1 => anyhow::bail!("{name} failed"),
        n => anyhow::bail!("{name} failed ({n} requests)"),
    }
}
