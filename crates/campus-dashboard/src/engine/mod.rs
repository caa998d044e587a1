//! Personalization engine: the stateful owner of the dashboard layout.
//!
//! The engine is built once per session by [`PersonalizationEngine::load`],
//! which reads the persisted layout, upgrades legacy data and merges it with
//! the catalog. After that, every mutating operation changes the in-memory
//! layout and immediately writes both key lists back to the store.
//!
//! Operations never fail. Out-of-range indices and unknown keys are no-ops
//! (reported through the `bool` return value) and a failed write is logged
//! while the in-memory change is kept for the rest of the session.

use std::fmt;
use std::str::FromStr;

use layout_store::LayoutStore;
use tracing::{debug, info, warn};

use crate::catalog::{DeviceClass, WidgetCatalog};
use crate::layout::{
    self, default_layout, encode_keys, first_run, reconcile, Layout, LayoutError, Migration,
    HIDDEN_KEY, SHOWN_KEY,
};

#[cfg(test)]
mod tests;

/// Direction of a single-step move in the shown list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the top of the dashboard (index - 1).
    Up,
    /// Towards the bottom of the dashboard (index + 1).
    Down,
}

impl Direction {
    /// Signed index offset of this direction.
    pub fn offset(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "-1" => Ok(Direction::Up),
            "down" | "+1" | "1" => Ok(Direction::Down),
            _ => Err(format!("invalid direction '{}', expected: up, down", s)),
        }
    }
}

/// Owner of the dashboard layout, writing through to a [`LayoutStore`].
#[derive(Debug)]
pub struct PersonalizationEngine<S: LayoutStore> {
    store: S,
    catalog: WidgetCatalog,
    layout: Layout,
}

impl<S: LayoutStore> PersonalizationEngine<S> {
    /// Loads the persisted layout from `store` and merges it with `catalog`.
    ///
    /// - Nothing persisted: first-run layout for `device` (not written).
    /// - Legacy layout: upgraded and written back in the current schema.
    /// - Unreadable or corrupt data: logged, first-run layout for `device`.
    pub fn load(store: S, catalog: WidgetCatalog, device: DeviceClass) -> Self {
        let mut engine = Self {
            store,
            catalog,
            layout: Layout::default(),
        };

        engine.layout = match engine.read_persisted() {
            Ok(Some(migration)) => {
                if migration.needs_persist {
                    engine.write_keys(&migration.layout.shown, &migration.layout.hidden);
                }
                reconcile(&migration.layout, &engine.catalog)
            }
            Ok(None) => {
                debug!(%device, "No persisted layout, using first-run default");
                first_run(&engine.catalog, device)
            }
            Err(e) => {
                warn!(error = %e, %device, "Ignoring unusable persisted layout");
                first_run(&engine.catalog, device)
            }
        };

        debug!(
            shown = engine.layout.shown.len(),
            hidden = engine.layout.hidden.len(),
            "Layout loaded"
        );
        engine
    }

    fn read_persisted(&self) -> Result<Option<Migration>, LayoutError> {
        let raw_shown = self
            .store
            .read(SHOWN_KEY)
            .map_err(|source| LayoutError::Unreadable {
                key: SHOWN_KEY,
                source,
            })?;
        let raw_hidden = self
            .store
            .read(HIDDEN_KEY)
            .map_err(|source| LayoutError::Unreadable {
                key: HIDDEN_KEY,
                source,
            })?;
        layout::migrate(raw_shown.as_deref(), raw_hidden.as_deref())
    }

    /// Moves the shown widget at `index` one step in `direction`.
    ///
    /// Returns `false` without writing if either `index` or the target
    /// position is outside the shown list.
    pub fn move_entry(&mut self, index: usize, direction: Direction) -> bool {
        let len = self.layout.shown.len();
        let Some(target) = index.checked_add_signed(direction.offset()) else {
            return false;
        };
        if index >= len || target >= len {
            return false;
        }

        let entry = self.layout.shown.remove(index);
        debug!(key = %entry.key, from = index, to = target, "Moving widget");
        self.layout.shown.insert(target, entry);
        self.persist();
        true
    }

    /// Moves the widget `key` from the shown list to the end of the hidden list.
    ///
    /// Returns `false` without writing if `key` is not shown.
    pub fn hide_entry(&mut self, key: &str) -> bool {
        let Some(index) = self.layout.shown.iter().position(|w| w.key == key) else {
            return false;
        };

        let entry = self.layout.shown.remove(index);
        debug!(key = %entry.key, "Hiding widget");
        self.layout.hidden.push(entry);
        self.persist();
        true
    }

    /// Moves the hidden widget at `index` to the end of the shown list.
    ///
    /// Returns `false` without writing if `index` is out of range.
    pub fn restore_entry(&mut self, index: usize) -> bool {
        if index >= self.layout.hidden.len() {
            return false;
        }

        let entry = self.layout.hidden.remove(index);
        debug!(key = %entry.key, "Restoring widget");
        self.layout.shown.push(entry);
        self.persist();
        true
    }

    /// Shows every catalog widget in catalog order and clears the hidden list.
    pub fn reset_to_default(&mut self) {
        info!("Resetting layout to catalog order");
        self.layout = default_layout(&self.catalog);
        self.persist();
    }

    /// The current layout.
    pub fn current_layout(&self) -> &Layout {
        &self.layout
    }

    /// The catalog this engine reconciles against.
    pub fn catalog(&self) -> &WidgetCatalog {
        &self.catalog
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let shown = encode_keys(&self.layout.shown_keys());
        let hidden = encode_keys(&self.layout.hidden_keys());
        self.write_raw(&shown, &hidden);
    }

    fn write_keys(&mut self, shown: &[String], hidden: &[String]) {
        self.write_raw(&encode_keys(shown), &encode_keys(hidden));
    }

    fn write_raw(&mut self, shown: &str, hidden: &str) {
        if let Err(e) = self
            .store
            .write_all(&[(SHOWN_KEY, shown), (HIDDEN_KEY, hidden)])
        {
            warn!(
                error = %e,
                "Failed to persist layout, change kept for this session only"
            );
        }
    }
}
