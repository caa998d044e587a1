//! Default configuration template and file creation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// Commented TOML template with every built-in default.
///
/// Values must match `Config::default()`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Campus Dashboard Configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/campus-dashboard/config.toml

# ==============================================================================
# Dashboard
# ==============================================================================

[dashboard]

# Device class used to build the layout on first run.
# Options: "desktop", "mobile"
#   desktop - every widget is shown
#   mobile  - desktop-only widgets (timetable, mensa, rooms) start hidden
# Only affects sessions with no saved layout.
device = "desktop"

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Path of the layout store file.
# Empty string means $XDG_DATA_HOME/campus-dashboard/layout.json.
# Tilde (~) is expanded to the user's home directory.
path = ""

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Logging verbosity level. CDASH_LOG overrides this when set.
# Options: "error", "warn", "info", "debug", "trace"
log_level = "info"
"#;

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
///
/// `target` defaults to `xdg::config_path()`. Returns the path where the
/// config was written.
pub fn create_default_config(
    target: Option<&Path>,
    force: bool,
) -> Result<PathBuf, ConfigError> {
    let path = target.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path, target.is_none())?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(path)
}

fn write_default_config(path: &Path, in_config_dir: bool) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if in_config_dir {
        xdg::ensure_config_dir().map_err(write_error)?;
    } else if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}
