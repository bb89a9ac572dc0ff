//! Admin dashboard: counters, the alerts table, submitted grievances and
//! user management.

use super::SectionContext;
use crate::actions::{RowAction, RowClick};
use crate::push::{PushChannel, Subscription};
use crate::templates::{
    ALERT_COLUMNS, GRIEVANCE_COLUMNS, USER_COLUMNS, alert_row, error_row, grievance_row, rows,
    user_row,
};
use landwatch_core::model::{NewUser, UserUpdate};

pub const USERS_COUNT: &str = "usersCount";
pub const REPORTS_COUNT: &str = "reportsCount";
pub const GRIEVANCES_COUNT: &str = "grievancesCount";

pub const ALERTS_TABLE: &str = "alertsTableBody";

pub const GRIEVANCES_TABLE: &str = "grievancesTableBody";

pub const USERS_TABLE: &str = "usersTableBody";
pub const ADD_USER_FORM: &str = "addUserForm";
pub const NEW_USER_NAME: &str = "newUserName";
pub const NEW_USER_EMAIL: &str = "newUserEmail";
pub const NEW_USER_PASSWORD: &str = "newUserPassword";
pub const NEW_USER_ROLE: &str = "newUserRole";

// =============================================================================
// Counters
// =============================================================================

pub struct AdminStatsSection {
    cx: SectionContext,
}

impl AdminStatsSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(USERS_COUNT).map(|cx| Self { cx })
    }

    pub async fn load(&self) {
        match self.cx.client.admin_stats().await {
            Ok(stats) => {
                let page = &self.cx.page;
                page.set_text(USERS_COUNT, &stats.users_count.to_string());
                page.set_text(REPORTS_COUNT, &stats.reports_count.to_string());
                page.set_text(GRIEVANCES_COUNT, &stats.grievances_count.to_string());
            }
            Err(e) => self.cx.failed("load admin stats", &e),
        }
    }
}

// =============================================================================
// Alerts
// =============================================================================

#[derive(Clone)]
pub struct AlertsSection {
    cx: SectionContext,
}

impl AlertsSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(ALERTS_TABLE).map(|cx| Self { cx })
    }

    pub async fn load(&self) {
        let html = match self.cx.client.alerts().await {
            Ok(alerts) => rows(&alerts, alert_row),
            Err(e) => {
                self.cx.failed("load alerts", &e);
                error_row(
                    ALERT_COLUMNS,
                    &format!("Failed to load alerts: {}", e.user_message()),
                )
            }
        };
        self.cx.page.set_html(ALERTS_TABLE, &html);
    }

    /// Subscribe to the configured push event.
    pub fn subscribe(&self, channel: &dyn PushChannel) -> Subscription {
        channel.subscribe(&self.cx.config.ui.push_event)
    }

    /// Reload the table on every pushed event until the subscription closes.
    pub async fn follow(&self, mut subscription: Subscription) {
        while let Some(event) = subscription.next().await {
            tracing::info!(event = %event.name, "Push event, reloading alerts");
            self.load().await;
        }
        tracing::debug!(event = subscription.event(), "Push subscription closed");
    }
}

// =============================================================================
// Grievances
// =============================================================================

pub struct GrievancesSection {
    cx: SectionContext,
}

impl GrievancesSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(GRIEVANCES_TABLE).map(|cx| Self { cx })
    }

    pub async fn load(&self) {
        let html = match self.cx.client.grievances().await {
            Ok(grievances) => rows(&grievances, grievance_row),
            Err(e) => {
                self.cx.failed("load grievances", &e);
                error_row(
                    GRIEVANCE_COLUMNS,
                    &format!("Failed to load grievances: {}", e.user_message()),
                )
            }
        };
        self.cx.page.set_html(GRIEVANCES_TABLE, &html);
    }
}

// =============================================================================
// Users
// =============================================================================

/// The users table and the add-user form.
///
/// Row controls are dispatched through [`UsersSection::on_container_click`],
/// the single handler on the table container.
#[derive(Clone)]
pub struct UsersSection {
    cx: SectionContext,
}

impl UsersSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(USERS_TABLE).map(|cx| Self { cx })
    }

    pub async fn load(&self) {
        let html = match self.cx.client.users().await {
            Ok(users) => rows(&users, user_row),
            Err(e) => {
                self.cx.failed("load users", &e);
                error_row(
                    USER_COLUMNS,
                    &format!("Failed to load users: {}", e.user_message()),
                )
            }
        };
        self.cx.page.set_html(USERS_TABLE, &html);
    }

    /// Add-user form submitted.
    pub async fn add_user(&self) {
        let page = &self.cx.page;
        let user = NewUser {
            name: page.field(NEW_USER_NAME),
            email: page.field(NEW_USER_EMAIL),
            password: page.field(NEW_USER_PASSWORD),
            role: page.field(NEW_USER_ROLE),
        };

        match self.cx.client.add_user(&user).await {
            Ok(_) => {
                tracing::info!(email = %user.email, "User added");
                page.reset_form(ADD_USER_FORM);
                self.load().await;
            }
            Err(e) => {
                self.cx.failed("add user", &e);
                page.alert(&format!("Failed to add user: {}", e.user_message()));
            }
        }
    }

    /// Click anywhere in the table container, described by attribute lookups
    /// on the clicked element. Clicks outside a row control do nothing.
    pub async fn on_container_click<'a>(&self, attr: impl Fn(&str) -> Option<&'a str>) {
        match RowClick::from_attributes(attr) {
            Some(click) => self.on_table_click(click.action, &click.key).await,
            None => tracing::trace!("Click outside a row control"),
        }
    }

    /// A resolved click on a row control.
    pub async fn on_table_click(&self, action: RowAction, email: &str) {
        match action {
            RowAction::Edit => self.edit(email).await,
            RowAction::Delete => self.delete(email).await,
        }
    }

    /// Confirm, then delete by email.
    pub async fn delete(&self, email: &str) {
        let page = &self.cx.page;
        if !page.confirm(&format!("Delete user {email}?")) {
            return;
        }

        match self.cx.client.delete_user(email).await {
            Ok(_) => {
                tracing::info!(email = %email, "User deleted");
                self.load().await;
            }
            Err(e) => {
                self.cx.failed("delete user", &e);
                page.alert(&format!("Failed to delete user: {}", e.user_message()));
            }
        }
    }

    /// Prompt for name, role and password, then send a partial update.
    pub async fn edit(&self, email: &str) {
        let page = &self.cx.page;
        let name = page.prompt("New name (leave blank to keep current):");
        let role = page.prompt("New role (admin/officer/public, leave blank to keep current):");
        let password = page.prompt("New password (leave blank to keep current):");
        let update = UserUpdate::from_answers(email, name, role, password);
        if update.is_empty() {
            tracing::debug!(email = %email, "User edit carries no changes");
        }

        match self.cx.client.update_user(&update).await {
            Ok(_) => {
                tracing::info!(email = %email, "User updated");
                self.load().await;
            }
            Err(e) => {
                self.cx.failed("update user", &e);
                page.alert(&format!("Failed to update user: {}", e.user_message()));
            }
        }
    }
}
