//! # landwatch-ui
//!
//! The request/render controller of the Landwatch pages. Every section maps
//! one page event to one backend call and one re-render of its own subtree.
//!
//! - [`page::Page`] is the page the sections read and mutate
//! - [`sections`] holds one type per page section, bound only when its guard
//!   element exists
//! - [`templates`] renders table rows and popups
//! - [`push`] subscribes the alerts table to real-time events
//! - [`MountedSections`] binds a whole page and runs its load fetches

pub mod actions;
pub mod controller;
pub mod page;
pub mod push;
pub mod sections;
pub mod templates;

pub use actions::{RowAction, RowClick};
pub use controller::MountedSections;
pub use page::{MapOverlay, MemoryPage, Page, PageEvent};
pub use push::{LocalPushBus, PushChannel, PushEvent, Subscription};
pub use sections::SectionContext;
