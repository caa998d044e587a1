//! Layout model for the personalized dashboard.
//!
//! A [`Layout`] partitions the catalog into an ordered `shown` list (display
//! order) and a `hidden` list (most recently hidden last). Layouts are
//! persisted as two JSON arrays of widget keys:
//!
//! - [`SHOWN_KEY`] holds the shown keys. Legacy layouts stored a single list
//!   here with [`HIDDEN_BELOW`] separating shown from hidden keys.
//! - [`HIDDEN_KEY`] holds the hidden keys.
//!
//! Loading goes through [`migrate`] (legacy detection) and then
//! [`reconcile`] (catalog merge).

mod migrate;
mod reconcile;

pub use migrate::{decode_keys, encode_keys, migrate, Migration};
pub use reconcile::{default_layout, first_run, reconcile};

use crate::catalog::WidgetDescriptor;
use layout_store::StoreError;
use thiserror::Error;

/// Storage key for the shown widget keys.
pub const SHOWN_KEY: &str = "personalized_dashboard";

/// Storage key for the hidden widget keys.
pub const HIDDEN_KEY: &str = "personalized_dashboard_hidden";

/// Separator used by the legacy single-list layout format.
pub const HIDDEN_BELOW: &str = "hidden-below";

/// Errors raised while reading a persisted layout.
///
/// Both variants are recovered at load time by falling back to the first-run
/// layout; they never reach the user.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Persisted value is not a JSON array of strings.
    #[error("Corrupt layout under '{key}': {message}")]
    Corrupt {
        /// Storage key holding the bad value.
        key: &'static str,
        /// Parser message.
        message: String,
    },

    /// The store could not be read.
    #[error("Failed to read layout under '{key}'")]
    Unreadable {
        /// Storage key being read.
        key: &'static str,
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
}

/// Persisted layout in the current two-list schema, as raw keys.
///
/// Keys are not yet checked against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedLayout {
    /// Shown keys in display order.
    pub shown: Vec<String>,
    /// Hidden keys, most recently hidden last.
    pub hidden: Vec<String>,
}

/// Shown and hidden widgets of the dashboard.
///
/// Invariants, upheld by every constructor in this crate:
/// - no key appears twice across `shown` and `hidden`
/// - after reconciliation every catalog key appears exactly once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub(crate) shown: Vec<WidgetDescriptor>,
    pub(crate) hidden: Vec<WidgetDescriptor>,
}

impl Layout {
    /// Widgets rendered on the dashboard, in display order.
    pub fn shown(&self) -> &[WidgetDescriptor] {
        &self.shown
    }

    /// Widgets removed from view, most recently hidden last.
    pub fn hidden(&self) -> &[WidgetDescriptor] {
        &self.hidden
    }

    /// Keys of [`Layout::shown`].
    pub fn shown_keys(&self) -> Vec<&str> {
        self.shown.iter().map(|w| w.key.as_str()).collect()
    }

    /// Keys of [`Layout::hidden`].
    pub fn hidden_keys(&self) -> Vec<&str> {
        self.hidden.iter().map(|w| w.key.as_str()).collect()
    }

    /// Position of `key` in the hidden list, for use with restore.
    pub fn hidden_index_of(&self, key: &str) -> Option<usize> {
        self.hidden.iter().position(|w| w.key == key)
    }

    /// Whether `key` is currently shown.
    pub fn is_shown(&self, key: &str) -> bool {
        self.shown.iter().any(|w| w.key == key)
    }

    /// The layout as raw keys, ready to persist.
    pub fn to_persisted(&self) -> PersistedLayout {
        PersistedLayout {
            shown: self.shown.iter().map(|w| w.key.clone()).collect(),
            hidden: self.hidden.iter().map(|w| w.key.clone()).collect(),
        }
    }
}
