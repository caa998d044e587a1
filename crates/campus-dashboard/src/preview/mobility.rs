//! Mobility card: departures, parking and charging near campus.
//!
//! The card's source is chosen by [`MobilitySettings`], persisted in the
//! layout store under [`SETTINGS_KEY`].

use std::fmt;

use chrono::NaiveTime;
use layout_store::{LayoutStore, StoreError};
use serde::{Deserialize, Serialize};

/// Storage key for [`MobilitySettings`].
pub const SETTINGS_KEY: &str = "mobility_settings";

/// Entries shown on the card.
pub const MAX_ENTRIES: usize = 4;

/// Station and destination names are cut to this many characters.
pub const MAX_STATION_LENGTH: usize = 20;

/// Bus stop used when nothing is configured.
pub const DEFAULT_BUS_STATION: &str = "Hochschule";

/// What the mobility card shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobilityKind {
    /// Bus departures.
    #[default]
    Bus,
    /// Train departures.
    Train,
    /// Free parking spaces.
    Parking,
    /// Free charging points.
    Charging,
}

impl fmt::Display for MobilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MobilityKind::Bus => write!(f, "bus"),
            MobilityKind::Train => write!(f, "train"),
            MobilityKind::Parking => write!(f, "parking"),
            MobilityKind::Charging => write!(f, "charging"),
        }
    }
}

/// Persisted choice of mobility source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobilitySettings {
    /// Source kind.
    pub kind: MobilityKind,
    /// Station for bus and train departures.
    #[serde(default)]
    pub station: Option<String>,
}

impl Default for MobilitySettings {
    fn default() -> Self {
        Self {
            kind: MobilityKind::Bus,
            station: Some(DEFAULT_BUS_STATION.to_string()),
        }
    }
}

impl MobilitySettings {
    /// Card title for these settings.
    pub fn label(&self) -> String {
        let station = self.station.as_deref().unwrap_or("?");
        match self.kind {
            MobilityKind::Bus => format!("Bus ({})", station),
            MobilityKind::Train => format!("Train ({})", station),
            MobilityKind::Parking => "Parking".to_string(),
            MobilityKind::Charging => "Charging stations".to_string(),
        }
    }
}

/// Reads the settings from `store`.
///
/// Missing, unreadable or malformed settings fall back to the default.
pub fn load_settings<S: LayoutStore + ?Sized>(store: &S) -> MobilitySettings {
    match store.read(SETTINGS_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring malformed mobility settings");
            MobilitySettings::default()
        }),
        Ok(None) => MobilitySettings::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read mobility settings");
            MobilitySettings::default()
        }
    }
}

/// Writes the settings to `store`.
pub fn save_settings<S: LayoutStore + ?Sized>(
    store: &mut S,
    settings: &MobilitySettings,
) -> layout_store::Result<()> {
    let raw = serde_json::to_string(settings).map_err(|e| StoreError::Parse(e.to_string()))?;
    store.write(SETTINGS_KEY, &raw)
}

/// Drops stored settings so the next load returns the default.
pub fn clear_settings<S: LayoutStore + ?Sized>(store: &mut S) -> layout_store::Result<()> {
    store.remove(SETTINGS_KEY)
}

/// One row of the mobility card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobilityEntry {
    /// A bus or train departure.
    Departure {
        /// Line or train number.
        line: String,
        /// Final stop.
        destination: String,
        /// Scheduled departure.
        time: NaiveTime,
    },
    /// A parking lot.
    Parking {
        /// Lot name.
        name: String,
        /// Free spaces, if reported.
        available: Option<u32>,
    },
    /// A charging station.
    Charging {
        /// Station name.
        name: String,
        /// Free charging points.
        available: u32,
        /// Total charging points.
        total: u32,
    },
}

impl MobilityEntry {
    /// Renders the entry with names cut to `max_len` characters.
    pub fn render(&self, max_len: usize) -> String {
        match self {
            MobilityEntry::Departure {
                line,
                destination,
                time,
            } => format!(
                "{} {} {}",
                time.format("%H:%M"),
                line,
                truncate(destination, max_len)
            ),
            MobilityEntry::Parking { name, available } => match available {
                Some(n) => format!("{}: {} free", truncate(name, max_len), n),
                None => format!("{}: n/a", truncate(name, max_len)),
            },
            MobilityEntry::Charging {
                name,
                available,
                total,
            } => format!("{}: {} of {} free", truncate(name, max_len), available, total),
        }
    }
}

/// Renders the first [`MAX_ENTRIES`] entries.
pub fn mobility_preview(entries: &[MobilityEntry]) -> Vec<String> {
    entries
        .iter()
        .take(MAX_ENTRIES)
        .map(|e| e.render(MAX_STATION_LENGTH))
        .collect()
}

fn truncate(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(max_len.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
