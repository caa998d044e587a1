//! Campus dashboard personalization library
//!
//! Keeps a user's dashboard layout (which widgets are shown, in what order,
//! and which are hidden) consistent with the widget catalog across sessions.
//!
//! - [`catalog`]: the known widgets and their default order
//! - [`layout`]: the layout model, legacy migration and catalog reconciliation
//! - [`engine`]: [`PersonalizationEngine`], which owns the layout and writes
//!   every change through to a [`layout_store::LayoutStore`]
//! - [`preview`]: summarizers for the lines each widget card shows
//!
//! # Example
//!
//! ```
//! use campus_dashboard::catalog::{DeviceClass, WidgetCatalog};
//! use campus_dashboard::{Direction, PersonalizationEngine};
//! use layout_store::MemoryStore;
//!
//! let mut engine = PersonalizationEngine::load(
//!     MemoryStore::new(),
//!     WidgetCatalog::builtin(),
//!     DeviceClass::Mobile,
//! );
//! assert!(!engine.current_layout().is_shown("mensa"));
//!
//! assert!(engine.hide_entry("install"));
//! assert!(engine.move_entry(0, Direction::Down));
//! assert!(!engine.move_entry(0, Direction::Up));
//! ```

/// Widget catalog and device classes.
pub mod catalog;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Layout engine owning the shown and hidden lists.
pub mod engine;

/// Layout model, migration and reconciliation.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Widget preview summarizers and sources.
pub mod preview;

pub use engine::{Direction, PersonalizationEngine};
