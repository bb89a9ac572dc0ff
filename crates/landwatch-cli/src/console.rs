//! Terminal-backed page.
//!
//! Fields come from command-line arguments, rendered regions are printed to
//! stdout and dialogs read from stdin unless answers were supplied up front.

use landwatch_ui::{MapOverlay, Page};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct ConsolePage {
    elements: HashSet<String>,
    fields: Mutex<HashMap<String, String>>,
    answers: Mutex<VecDeque<Option<String>>>,
    assume_yes: bool,
    redirect: Mutex<Option<String>>,
}

impl ConsolePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.insert(id.to_string());
        self
    }

    pub fn with_elements(mut self, ids: &[&str]) -> Self {
        self.elements.extend(ids.iter().map(|id| id.to_string()));
        self
    }

    /// Add a field; `None` leaves it empty.
    pub fn with_field(mut self, id: &str, value: Option<&str>) -> Self {
        self.elements.insert(id.to_string());
        self.lock_fields()
            .insert(id.to_string(), value.unwrap_or_default().to_string());
        self
    }

    /// Accept every confirmation without asking.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Pre-answered prompts, consumed in order before stdin is read.
    pub fn with_answers(self, answers: Vec<Option<String>>) -> Self {
        self.answers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(answers);
        self
    }

    /// Last navigation target, if any.
    pub fn redirect(&self) -> Option<String> {
        self.redirect
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn lock_fields(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.fields.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read_line(question: &str) -> Option<String> {
        print!("{question} ");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Page for ConsolePage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn field_value(&self, id: &str) -> Option<String> {
        self.lock_fields().get(id).cloned()
    }

    fn set_text(&self, id: &str, text: &str) {
        println!("{id}: {text}");
    }

    fn set_visible(&self, id: &str, visible: bool) {
        tracing::trace!(element = id, visible, "Visibility changed");
    }

    fn set_html(&self, _id: &str, html: &str) {
        let text = html_to_text(html);
        if text.is_empty() {
            println!("(no rows)");
        } else {
            println!("{text}");
        }
    }

    fn set_image_src(&self, id: &str, src: &str) {
        let (kind, payload) = src.split_once(',').unwrap_or(("", src));
        println!("{id}: {kind} ({} bytes)", payload.len());
    }

    fn reset_form(&self, id: &str) {
        tracing::debug!(form = id, "Form reset");
    }

    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Self::read_line(&format!("{message} [y/N]"))
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn prompt(&self, message: &str) -> Option<String> {
        let queued = self
            .answers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match queued {
            Some(answer) => answer,
            None => Self::read_line(message),
        }
    }

    fn navigate(&self, target: &str) {
        println!("Redirect: {target}");
        *self.redirect.lock().unwrap_or_else(|e| e.into_inner()) = Some(target.to_string());
    }

    fn navigate_after(&self, target: &str, delay: Duration) {
        println!("Redirect in {} ms: {target}", delay.as_millis());
        *self.redirect.lock().unwrap_or_else(|e| e.into_inner()) = Some(target.to_string());
    }

    fn reload(&self) {
        println!("(page reload)");
    }

    fn show_map_overlays(&self, _id: &str, overlays: &[MapOverlay]) {
        println!("{} feature(s)", overlays.len());
        for overlay in overlays {
            let kind = overlay.geometry["type"].as_str().unwrap_or("?");
            println!("  [{kind}] {}", html_to_text(&overlay.popup));
        }
    }
}

// =============================================================================
// HTML to text
// =============================================================================

/// Flatten rendered rows into one line per row, cells separated by ` | `.
pub fn html_to_text(html: &str) -> String {
    html.split("</tr>")
        .map(|row| {
            row.split("</td>")
                .map(|cell| unescape(&strip_tags(&cell.replace("<br>", ", "))))
                .map(|cell| cell.trim().to_string())
                .filter(|cell| !cell.is_empty())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use landwatch_core::model::{FeatureProperties, UserRow};
    use landwatch_ui::templates::{error_row, feature_popup, user_row};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_rows_flatten() {
        let html = user_row(&UserRow {
            name: Some("A & B".to_string()),
            email: "x@y.com".to_string(),
            role: None,
        });
        assert_eq!(html_to_text(&html), "A & B | x@y.com | - | EditDelete");
    }

    #[test]
    fn test_error_row_flattens_to_message() {
        assert_eq!(html_to_text(&error_row(4, "Failed")), "Failed");
    }

    #[test]
    fn test_popup_flattens() {
        let popup = feature_popup(&FeatureProperties::default());
        assert_eq!(html_to_text(&popup), "Owner: Unknown, Khasra: -, Time: -");
    }

    #[test]
    fn test_prompt_answers_consumed_first() {
        let page = ConsolePage::new().with_answers(vec![Some("Asha".to_string()), None]);
        assert_eq!(page.prompt("name?").as_deref(), Some("Asha"));
        assert_eq!(page.prompt("role?"), None);
    }

    #[test]
    fn test_fields_are_elements() {
        let page = ConsolePage::new()
            .with_field("loginEmail", Some("a@b.c"))
            .with_field("loginRole", None);
        assert!(page.has_element("loginEmail"));
        assert_eq!(page.field("loginRole"), "");
        assert!(!page.has_element("loginForm"));
    }
}
