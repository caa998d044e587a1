//! TOML configuration schema for the campus dashboard.
//!
//! Every section derives `Deserialize` and `Serialize` with `#[serde(default)]`,
//! so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::DeviceClass;
use crate::config::xdg;

/// Root configuration.
///
/// ```toml
/// [dashboard]
/// [storage]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dashboard behavior.
    pub dashboard: DashboardConfig,
    /// Where the layout is persisted.
    pub storage: StorageConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// `[dashboard]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Device class used for the first-run layout.
    pub device: DeviceClass,
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Layout store file. Empty string means the XDG data location.
    /// Tilde (~) is expanded.
    pub path: String,
}

impl StorageConfig {
    /// Resolved location of the layout store file.
    pub fn resolve_path(&self) -> PathBuf {
        if self.path.trim().is_empty() {
            xdg::layout_path()
        } else {
            xdg::expand_tilde(self.path.trim())
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Verbosity used when `CDASH_LOG` is unset.
    pub log_level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// The level as an `EnvFilter` directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
