//! Page controller: binds every section present on the page and runs the
//! page-load fetches.

use crate::push::PushChannel;
use crate::sections::*;
use tokio::task::JoinHandle;

/// Sections bound on the current page. Absent sections are `None`.
#[derive(Default)]
pub struct MountedSections {
    pub language: Option<LanguageSection>,
    pub translations: Option<TranslationsSection>,
    pub register: Option<RegisterSection>,
    pub login: Option<LoginSection>,
    pub forgot_password: Option<ForgotPasswordSection>,
    pub thumbnails: Option<ThumbnailsSection>,
    pub manual_fetch: Option<ManualFetchSection>,
    pub detection: Option<DetectionSection>,
    pub hotspots: Option<HotspotsSection>,
    pub public_stats: Option<PublicStatsSection>,
    pub reports: Option<ReportsSection>,
    pub report_generate: Option<ReportGenerateSection>,
    pub map: Option<MapSection>,
    pub admin_stats: Option<AdminStatsSection>,
    pub alerts: Option<AlertsSection>,
    pub grievances: Option<GrievancesSection>,
    pub users: Option<UsersSection>,
    pub grievance: Option<GrievanceSection>,
    pub leaderboard: Option<LeaderboardSection>,
    pub contact: Option<ContactSection>,
}

impl MountedSections {
    /// Bind every section whose guard element exists. Issues no requests.
    pub fn bind(cx: &SectionContext) -> Self {
        let sections = Self {
            language: LanguageSection::bind(cx),
            translations: TranslationsSection::bind(cx),
            register: RegisterSection::bind(cx),
            login: LoginSection::bind(cx),
            forgot_password: ForgotPasswordSection::bind(cx),
            thumbnails: ThumbnailsSection::bind(cx),
            manual_fetch: ManualFetchSection::bind(cx),
            detection: DetectionSection::bind(cx),
            hotspots: HotspotsSection::bind(cx),
            public_stats: PublicStatsSection::bind(cx),
            reports: ReportsSection::bind(cx),
            report_generate: ReportGenerateSection::bind(cx),
            map: MapSection::bind(cx),
            admin_stats: AdminStatsSection::bind(cx),
            alerts: AlertsSection::bind(cx),
            grievances: GrievancesSection::bind(cx),
            users: UsersSection::bind(cx),
            grievance: GrievanceSection::bind(cx),
            leaderboard: LeaderboardSection::bind(cx),
            contact: ContactSection::bind(cx),
        };
        tracing::debug!(bound = sections.bound_count(), "Sections bound");
        sections
    }

    /// Bind, then run the page-load fetches of the bound sections.
    pub async fn mount(cx: &SectionContext) -> Self {
        let sections = Self::bind(cx);
        sections.load().await;
        sections
    }

    /// Page-load fetches, one section after another.
    pub async fn load(&self) {
        if let Some(s) = &self.translations {
            s.load().await;
        }
        if let Some(s) = &self.thumbnails {
            s.load().await;
        }
        if let Some(s) = &self.public_stats {
            s.load().await;
        }
        if let Some(s) = &self.hotspots {
            s.load().await;
        }
        if let Some(s) = &self.reports {
            s.load().await;
        }
        if let Some(s) = &self.map {
            s.load().await;
        }
        if let Some(s) = &self.admin_stats {
            s.load().await;
        }
        if let Some(s) = &self.alerts {
            s.load().await;
        }
        if let Some(s) = &self.grievances {
            s.load().await;
        }
        if let Some(s) = &self.users {
            s.load().await;
        }
        if let Some(s) = &self.leaderboard {
            s.load().await;
        }
    }

    /// Start reloading the alerts table on push events.
    ///
    /// `None` when the alerts table is not on the page. Aborting the task or
    /// closing the channel ends the subscription.
    pub fn follow_alerts(&self, channel: &dyn PushChannel) -> Option<JoinHandle<()>> {
        let alerts = self.alerts.clone()?;
        let subscription = alerts.subscribe(channel);
        Some(tokio::spawn(async move { alerts.follow(subscription).await }))
    }

    pub fn bound_count(&self) -> usize {
        [
            self.language.is_some(),
            self.translations.is_some(),
            self.register.is_some(),
            self.login.is_some(),
            self.forgot_password.is_some(),
            self.thumbnails.is_some(),
            self.manual_fetch.is_some(),
            self.detection.is_some(),
            self.hotspots.is_some(),
            self.public_stats.is_some(),
            self.reports.is_some(),
            self.report_generate.is_some(),
            self.map.is_some(),
            self.admin_stats.is_some(),
            self.alerts.is_some(),
            self.grievances.is_some(),
            self.users.is_some(),
            self.grievance.is_some(),
            self.leaderboard.is_some(),
            self.contact.is_some(),
        ]
        .into_iter()
        .filter(|bound| *bound)
        .count()
    }
}
