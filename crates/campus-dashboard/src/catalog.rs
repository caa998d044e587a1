//! Widget catalog for the campus dashboard.
//!
//! The catalog is the build-time list of every widget the dashboard knows
//! about. Its order is the default display order: a reset layout shows the
//! catalog front to back, and widgets introduced by a newer build are
//! appended to existing layouts in catalog order.
//!
//! # Example
//!
//! ```
//! use campus_dashboard::catalog::WidgetCatalog;
//!
//! let catalog = WidgetCatalog::builtin();
//! let mensa = catalog.find("mensa").expect("mensa widget exists");
//! assert!(mensa.device_restricted);
//! assert!(catalog.find("nonexistent").is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Built-in widgets as `(key, label, desktop_only)`, in default display order.
const BUILTIN_WIDGETS: &[(&str, &str, bool)] = &[
    ("install", "Installation", false),
    ("discord", "Discord server", false),
    ("timetable", "Timetable", true),
    ("mensa", "Cafeteria menu", true),
    ("mobility", "Mobility", false),
    ("calendar", "Events", false),
    ("rooms", "Room map", true),
    ("library", "Library", false),
    ("grades", "Grades & subjects", false),
    ("personal", "Personal data", false),
    ("lecturers", "Lecturers", false),
];

/// Immutable description of one dashboard widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// Stable identifier, unique within a catalog. Persisted in layouts.
    pub key: String,
    /// Human-readable name shown in the personalization list.
    pub label: String,
    /// Whether the widget is hidden by default on restricted (mobile) devices.
    pub device_restricted: bool,
}

impl WidgetDescriptor {
    /// Creates a widget available on every device class.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            device_restricted: false,
        }
    }

    /// Creates a widget that a first run on a mobile device starts hidden.
    pub fn desktop_only(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            device_restricted: true,
            ..Self::new(key, label)
        }
    }
}

/// Class of device the dashboard runs on.
///
/// Only consulted when building the first-run layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    /// Large screen; every widget is shown.
    #[default]
    Desktop,
    /// Small screen; desktop-only widgets start hidden.
    Mobile,
}

impl DeviceClass {
    /// Whether desktop-only widgets should start hidden on this device.
    pub fn is_restricted(self) -> bool {
        matches!(self, DeviceClass::Mobile)
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Desktop => write!(f, "desktop"),
            DeviceClass::Mobile => write!(f, "mobile"),
        }
    }
}

impl FromStr for DeviceClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desktop" => Ok(DeviceClass::Desktop),
            "mobile" => Ok(DeviceClass::Mobile),
            _ => Err(format!(
                "invalid device class '{}', expected: desktop, mobile",
                s
            )),
        }
    }
}

/// Errors raised while building a custom catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two descriptors share the same key.
    #[error("Duplicate widget key in catalog: {0}")]
    DuplicateKey(String),
}

/// Ordered, immutable set of widget descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetCatalog {
    widgets: Vec<WidgetDescriptor>,
}

impl WidgetCatalog {
    /// Builds a catalog from descriptors in display order.
    ///
    /// Returns [`CatalogError::DuplicateKey`] if a key appears twice.
    pub fn new(widgets: Vec<WidgetDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for widget in &widgets {
            if !seen.insert(widget.key.as_str()) {
                return Err(CatalogError::DuplicateKey(widget.key.clone()));
            }
        }
        Ok(Self { widgets })
    }

    /// The catalog compiled into this build.
    pub fn builtin() -> Self {
        Self {
            widgets: BUILTIN_WIDGETS
                .iter()
                .map(|&(key, label, desktop_only)| WidgetDescriptor {
                    key: key.to_string(),
                    label: label.to_string(),
                    device_restricted: desktop_only,
                })
                .collect(),
        }
    }

    /// All widgets in catalog order.
    pub fn all(&self) -> &[WidgetDescriptor] {
        &self.widgets
    }

    /// Looks up a widget by key.
    pub fn find(&self, key: &str) -> Option<&WidgetDescriptor> {
        self.widgets.iter().find(|w| w.key == key)
    }

    /// Widget keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.widgets.iter().map(|w| w.key.as_str())
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the catalog has no widgets.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl Default for WidgetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
