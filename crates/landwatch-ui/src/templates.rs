//! HTML fragments rendered into table bodies and map popups.
//!
//! Same approach as the rest of the UI: plain `format!` templates with
//! Tailwind classes. Every interpolated value is escaped.

use landwatch_client::endpoints::report_download_href;
use landwatch_core::model::{
    AlertRow, FeatureProperties, GrievanceRow, Hotspot, LeaderboardItem, ReportRow, UserRow,
};

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn cell(content: &str) -> String {
    format!(r#"<td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900 dark:text-gray-100">{content}</td>"#)
}

fn row(cells: &[String]) -> String {
    let cells: String = cells.iter().map(|c| cell(c)).collect();
    format!(r#"<tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50">{cells}</tr>"#)
}

/// Render every item as a row and concatenate.
pub fn rows<T>(items: &[T], render: impl Fn(&T) -> String) -> String {
    items.iter().map(render).collect()
}

/// A single row spanning the whole table, carrying an error message.
pub fn error_row(colspan: usize, message: &str) -> String {
    format!(
        r##"<tr><td colspan="{colspan}" class="px-6 py-4 text-center text-sm text-red-600 dark:text-red-400">{message}</td></tr>"##,
        message = escape(message),
    )
}

/// Badge component.
pub fn badge(text: &str, color: &str) -> String {
    format!(
        r##"<span class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium bg-{color}-100 dark:bg-{color}-900/30 text-{color}-800 dark:text-{color}-300">{text}</span>"##,
        text = escape(text),
    )
}

// =============================================================================
// Reports
// =============================================================================

/// Columns: type, ward, date, details, download.
pub const REPORT_COLUMNS: usize = 5;

pub fn report_row(report: &ReportRow) -> String {
    let download = format!(
        r##"<a href="{href}" class="text-primary-600 hover:underline"><i class="fas fa-download"></i> Download</a>"##,
        href = escape(&report_download_href(&report.id)),
    );
    row(&[
        escape(&report.kind),
        escape(report.ward_label()),
        escape(report.date_label()),
        escape(&report.details_label()),
        download,
    ])
}

// =============================================================================
// Users
// =============================================================================

/// Columns: name, email, role, actions.
pub const USER_COLUMNS: usize = 4;

/// User row. Controls carry `data-action` and `data-email`; the table
/// container dispatches clicks, rows bind nothing.
pub fn user_row(user: &UserRow) -> String {
    let email = escape(&user.email);
    let actions = format!(
        r##"<button class="text-primary-600 hover:text-primary-800 mr-3" data-action="edit" data-email="{email}">Edit</button><button class="text-red-600 hover:text-red-800" data-action="delete" data-email="{email}">Delete</button>"##
    );
    row(&[
        escape(user.name_label()),
        email.clone(),
        escape(user.role_label()),
        actions,
    ])
}

// =============================================================================
// Alerts
// =============================================================================

/// Columns: ward, location, coordinates, date, severity, status.
pub const ALERT_COLUMNS: usize = 6;

fn severity_color(severity: &str) -> &'static str {
    match severity.to_ascii_lowercase().as_str() {
        "high" => "red",
        "medium" => "yellow",
        "low" => "green",
        _ => "gray",
    }
}

pub fn alert_row(alert: &AlertRow) -> String {
    let [ward, location, coordinates, date, severity, status] = alert.cells();
    row(&[
        escape(ward),
        escape(location),
        escape(coordinates),
        escape(date),
        badge(severity, severity_color(severity)),
        escape(status),
    ])
}

// =============================================================================
// Hotspots
// =============================================================================

/// Columns: ward, risk.
pub const HOTSPOT_COLUMNS: usize = 2;

fn risk_color(risk: Option<f64>) -> &'static str {
    match risk {
        Some(r) if r >= 0.75 => "red",
        Some(r) if r >= 0.5 => "yellow",
        Some(_) => "green",
        None => "gray",
    }
}

pub fn hotspot_row(hotspot: &Hotspot) -> String {
    row(&[
        escape(hotspot.ward.as_deref().unwrap_or("-")),
        badge(&hotspot.risk_label(), risk_color(hotspot.risk)),
    ])
}

// =============================================================================
// Grievances
// =============================================================================

/// Columns: name, email, ward, location, description, submitted.
pub const GRIEVANCE_COLUMNS: usize = 6;

pub fn grievance_row(grievance: &GrievanceRow) -> String {
    row(&grievance.cells().map(escape))
}

/// Columns: rank, name, count.
pub const LEADERBOARD_COLUMNS: usize = 3;

pub fn leaderboard_row(rank: usize, item: &LeaderboardItem) -> String {
    row(&[
        rank.to_string(),
        escape(item.display_name()),
        item.count.to_string(),
    ])
}

// =============================================================================
// Map
// =============================================================================

pub fn feature_popup(properties: &FeatureProperties) -> String {
    format!(
        "<b>Owner:</b> {owner}<br><b>Khasra:</b> {khasra}<br><b>Time:</b> {time}",
        owner = escape(properties.owner_label()),
        khasra = escape(properties.khasra_label()),
        time = escape(properties.timestamp_label()),
    )
}
