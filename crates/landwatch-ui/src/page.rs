//! The page abstraction.
//!
//! Sections never touch a concrete DOM. They read fields and mutate elements
//! by id through [`Page`], so the same controller drives a browser binding,
//! the console harness, or the in-memory [`MemoryPage`] used in tests.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// A feature installed on the map layer with its popup markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverlay {
    pub geometry: serde_json::Value,
    pub popup: String,
}

/// Everything a section may do to the page.
pub trait Page: Send + Sync {
    /// Whether an element with this id exists on the current page.
    fn has_element(&self, id: &str) -> bool;

    /// Current value of a form field, read at call time.
    fn field_value(&self, id: &str) -> Option<String>;

    fn set_text(&self, id: &str, text: &str);

    fn set_visible(&self, id: &str, visible: bool);

    /// Replace the element's whole content.
    fn set_html(&self, id: &str, html: &str);

    fn set_image_src(&self, id: &str, src: &str);

    fn reset_form(&self, id: &str);

    /// Blocking alert dialog.
    fn alert(&self, message: &str);

    /// Blocking confirmation dialog; `true` when the user accepts.
    fn confirm(&self, message: &str) -> bool;

    /// Blocking prompt; `None` when the user cancels.
    fn prompt(&self, message: &str) -> Option<String>;

    fn navigate(&self, target: &str);

    fn navigate_after(&self, target: &str, delay: Duration);

    fn reload(&self);

    /// Replace the map layer's features.
    fn show_map_overlays(&self, id: &str, overlays: &[MapOverlay]);

    /// Field value, empty when the field is absent.
    fn field(&self, id: &str) -> String {
        self.field_value(id).unwrap_or_default()
    }

    /// Set a banner's text and show it.
    fn show_banner(&self, id: &str, text: &str) {
        self.set_text(id, text);
        self.set_visible(id, true);
    }
}

// =============================================================================
// In-memory page
// =============================================================================

/// One recorded page mutation or dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Text { id: String, text: String },
    Visible { id: String, visible: bool },
    Html { id: String },
    ImageSrc { id: String, src: String },
    FormReset { id: String },
    Alert(String),
    Confirm(String),
    Prompt(String),
    Navigate { target: String, delay: Option<Duration> },
    Reload,
    MapOverlays { id: String, count: usize },
}

#[derive(Debug, Clone, Default)]
struct Element {
    text: String,
    html: String,
    visible: bool,
    value: Option<String>,
    src: Option<String>,
    overlays: Vec<MapOverlay>,
}

#[derive(Debug, Default)]
struct MemoryState {
    elements: HashMap<String, Element>,
    forms: HashMap<String, Vec<String>>,
    events: Vec<PageEvent>,
    confirms: VecDeque<bool>,
    prompts: VecDeque<Option<String>>,
}

/// A retained page model that records every interaction.
///
/// Mutations of unknown ids are recorded as events but create no element, so
/// guards keep answering for the page as it was built. Unscripted confirms
/// decline and unscripted prompts cancel.
#[derive(Debug, Default)]
pub struct MemoryPage {
    state: Mutex<MemoryState>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element.
    pub fn with_element(self, id: &str) -> Self {
        self.lock()
            .elements
            .entry(id.to_string())
            .or_default();
        self
    }

    /// Add a form field holding `value`.
    pub fn with_field(self, id: &str, value: &str) -> Self {
        self.lock().elements.entry(id.to_string()).or_default().value = Some(value.to_string());
        self
    }

    /// Add a form owning the given fields.
    pub fn with_form(self, id: &str, fields: &[&str]) -> Self {
        {
            let mut state = self.lock();
            state.elements.entry(id.to_string()).or_default();
            for field in fields {
                state.elements.entry(field.to_string()).or_default();
            }
            state
                .forms
                .insert(id.to_string(), fields.iter().map(|f| f.to_string()).collect());
        }
        self
    }

    /// Type into a field.
    pub fn fill(&self, id: &str, value: &str) {
        self.lock().elements.entry(id.to_string()).or_default().value = Some(value.to_string());
    }

    /// Answer the next confirm dialog.
    pub fn queue_confirm(&self, answer: bool) {
        self.lock().confirms.push_back(answer);
    }

    /// Answer the next prompt dialog.
    pub fn queue_prompt(&self, answer: Option<&str>) {
        self.lock().prompts.push_back(answer.map(str::to_string));
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.lock().elements.get(id).map(|e| e.text.clone())
    }

    pub fn html(&self, id: &str) -> Option<String> {
        self.lock().elements.get(id).map(|e| e.html.clone())
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.lock().elements.get(id).is_some_and(|e| e.visible)
    }

    pub fn image_src(&self, id: &str) -> Option<String> {
        self.lock().elements.get(id).and_then(|e| e.src.clone())
    }

    pub fn overlays(&self, id: &str) -> Vec<MapOverlay> {
        self.lock()
            .elements
            .get(id)
            .map(|e| e.overlays.clone())
            .unwrap_or_default()
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.lock().events.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<(String, Option<Duration>)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Navigate { target, delay } => Some((target, delay)),
                _ => None,
            })
            .collect()
    }

    pub fn reload_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, PageEvent::Reload))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn update(&self, id: &str, event: PageEvent, f: impl FnOnce(&mut Element)) {
        let mut state = self.lock();
        if let Some(element) = state.elements.get_mut(id) {
            f(element);
        }
        state.events.push(event);
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.lock().elements.contains_key(id)
    }

    fn field_value(&self, id: &str) -> Option<String> {
        self.lock().elements.get(id).and_then(|e| e.value.clone())
    }

    fn set_text(&self, id: &str, text: &str) {
        let event = PageEvent::Text {
            id: id.to_string(),
            text: text.to_string(),
        };
        self.update(id, event, |e| e.text = text.to_string());
    }

    fn set_visible(&self, id: &str, visible: bool) {
        let event = PageEvent::Visible {
            id: id.to_string(),
            visible,
        };
        self.update(id, event, |e| e.visible = visible);
    }

    fn set_html(&self, id: &str, html: &str) {
        let event = PageEvent::Html { id: id.to_string() };
        self.update(id, event, |e| e.html = html.to_string());
    }

    fn set_image_src(&self, id: &str, src: &str) {
        let event = PageEvent::ImageSrc {
            id: id.to_string(),
            src: src.to_string(),
        };
        self.update(id, event, |e| e.src = Some(src.to_string()));
    }

    fn reset_form(&self, id: &str) {
        let mut state = self.lock();
        let fields = state.forms.get(id).cloned().unwrap_or_default();
        for field in fields {
            if let Some(element) = state.elements.get_mut(&field) {
                element.value = Some(String::new());
            }
        }
        state.events.push(PageEvent::FormReset { id: id.to_string() });
    }

    fn alert(&self, message: &str) {
        self.lock().events.push(PageEvent::Alert(message.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        let mut state = self.lock();
        state.events.push(PageEvent::Confirm(message.to_string()));
        state.confirms.pop_front().unwrap_or(false)
    }

    fn prompt(&self, message: &str) -> Option<String> {
        let mut state = self.lock();
        state.events.push(PageEvent::Prompt(message.to_string()));
        state.prompts.pop_front().flatten()
    }

    fn navigate(&self, target: &str) {
        self.lock().events.push(PageEvent::Navigate {
            target: target.to_string(),
            delay: None,
        });
    }

    fn navigate_after(&self, target: &str, delay: Duration) {
        self.lock().events.push(PageEvent::Navigate {
            target: target.to_string(),
            delay: Some(delay),
        });
    }

    fn reload(&self) {
        self.lock().events.push(PageEvent::Reload);
    }

    fn show_map_overlays(&self, id: &str, overlays: &[MapOverlay]) {
        let event = PageEvent::MapOverlays {
            id: id.to_string(),
            count: overlays.len(),
        };
        self.update(id, event, |e| e.overlays = overlays.to_vec());
    }
}
