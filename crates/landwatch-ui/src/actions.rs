//! Delegated row actions.
//!
//! Table rows carry `data-action` and a row key attribute. The table
//! container owns the only click handler and hands the pair to its section.

use std::fmt;
use std::str::FromStr;

/// Action attribute name.
pub const ACTION_ATTR: &str = "data-action";

/// Row key attribute name of the users table.
pub const EMAIL_ATTR: &str = "data-email";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

impl RowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowAction::Edit => "edit",
            RowAction::Delete => "delete",
        }
    }
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RowAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit" => Ok(RowAction::Edit),
            "delete" => Ok(RowAction::Delete),
            other => Err(format!("unknown row action '{other}'")),
        }
    }
}

/// A click on a row control, resolved from the clicked element's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClick {
    pub action: RowAction,
    pub key: String,
}

impl RowClick {
    /// Resolve a click from attribute lookups on the clicked element.
    ///
    /// Clicks outside a control (no action, unknown action, or no key) yield
    /// `None` and are ignored by the container.
    pub fn from_attributes<'a>(attr: impl Fn(&str) -> Option<&'a str>) -> Option<Self> {
        let action = attr(ACTION_ATTR)?.parse().ok()?;
        let key = attr(EMAIL_ATTR).filter(|k| !k.is_empty())?;
        Some(Self {
            action,
            key: key.to_string(),
        })
    }
}
