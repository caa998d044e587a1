//! Logging initialization for `cdash`.
//!
//! Filter directives come from the `CDASH_LOG` environment variable and fall
//! back to the configured `[logging] log_level`.
//!
//! ```bash
//! CDASH_LOG=debug cdash show
//! CDASH_LOG=campus_dashboard::engine=debug,warn cdash move 2 up
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "CDASH_LOG";

/// Builds the filter: `CDASH_LOG` if set and valid, otherwise `fallback`.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Install the global tracing subscriber writing to stderr.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// stays in place.
pub fn init(fallback: LogLevel) -> bool {
    match fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "Tracing subscriber already installed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn env_filter_parses_every_level_directive() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert!(
                EnvFilter::try_new(level.as_directive()).is_ok(),
                "failed to parse directive: {}",
                level.as_directive()
            );
        }
    }

    #[test]
    fn env_filter_parses_module_directive() {
        assert!(EnvFilter::try_new("campus_dashboard::engine=debug,warn").is_ok());
    }

    #[test]
    #[serial]
    fn filter_prefers_environment() {
        let original = std::env::var(LOG_ENV).ok();
        std::env::set_var(LOG_ENV, "trace");
        assert_eq!(filter(LogLevel::Error).to_string(), "trace");
        std::env::remove_var(LOG_ENV);
        assert_eq!(filter(LogLevel::Error).to_string(), "error");
        if let Some(v) = original {
            std::env::set_var(LOG_ENV, v);
        }
    }

    #[test]
    fn second_init_keeps_existing_subscriber() {
        init(LogLevel::Warn);
        assert!(
            !init(LogLevel::Warn),
            "a subscriber is installed after the first call"
        );
    }
}
