//! Detection and upgrade of legacy persisted layouts.
//!
//! Two encodings exist on disk:
//!
//! - **legacy**: one list under [`SHOWN_KEY`] with [`HIDDEN_BELOW`] between
//!   the shown and the hidden keys
//! - **current**: shown keys under [`SHOWN_KEY`], hidden keys under
//!   [`HIDDEN_KEY`]
//!
//! [`migrate`] never touches a store. When it upgrades a legacy layout it
//! sets [`Migration::needs_persist`] and the caller writes the result back,
//! so the split happens once instead of on every load.

use super::{LayoutError, PersistedLayout, HIDDEN_BELOW, HIDDEN_KEY, SHOWN_KEY};

/// Outcome of reading a persisted layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Layout in the current schema.
    pub layout: PersistedLayout,
    /// Whether the layout was upgraded and should be written back.
    pub needs_persist: bool,
}

/// Normalizes raw persisted values into the current schema.
///
/// - `raw_shown` absent: `Ok(None)`, nothing persisted yet
/// - `raw_shown` contains [`HIDDEN_BELOW`]: split at the first sentinel,
///   `needs_persist = true`
/// - otherwise: passed through unchanged; an absent `raw_hidden` reads as an
///   empty hidden list
///
/// Returns [`LayoutError::Corrupt`] if a present value is not a JSON array of
/// strings.
pub fn migrate(
    raw_shown: Option<&str>,
    raw_hidden: Option<&str>,
) -> Result<Option<Migration>, LayoutError> {
    let Some(raw_shown) = raw_shown else {
        return Ok(None);
    };
    let shown = decode_keys(SHOWN_KEY, raw_shown)?;

    if let Some(sentinel) = shown.iter().position(|key| key == HIDDEN_BELOW) {
        let hidden = shown[sentinel + 1..].to_vec();
        let mut shown = shown;
        shown.truncate(sentinel);
        tracing::info!(
            shown = shown.len(),
            hidden = hidden.len(),
            "Upgrading legacy single-list layout"
        );
        return Ok(Some(Migration {
            layout: PersistedLayout { shown, hidden },
            needs_persist: true,
        }));
    }

    let hidden = match raw_hidden {
        Some(raw) => decode_keys(HIDDEN_KEY, raw)?,
        None => Vec::new(),
    };

    Ok(Some(Migration {
        layout: PersistedLayout { shown, hidden },
        needs_persist: false,
    }))
}

/// Parses a JSON array of widget keys stored under `key`.
pub fn decode_keys(key: &'static str, raw: &str) -> Result<Vec<String>, LayoutError> {
    serde_json::from_str(raw).map_err(|e| LayoutError::Corrupt {
        key,
        message: e.to_string(),
    })
}

/// Serializes widget keys as a JSON array.
pub fn encode_keys<S: AsRef<str>>(keys: &[S]) -> String {
    serde_json::Value::from(
        keys.iter()
            .map(|k| k.as_ref().to_string())
            .collect::<Vec<_>>(),
    )
    .to_string()
}
