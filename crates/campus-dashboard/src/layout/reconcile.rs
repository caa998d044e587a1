//! Merging persisted layouts with the current catalog.

use std::collections::HashSet;

use super::{Layout, PersistedLayout};
use crate::catalog::{DeviceClass, WidgetCatalog, WidgetDescriptor};

/// Merges a persisted layout with `catalog`.
///
/// 1. Shown and hidden keys are resolved through the catalog; unknown keys
///    (removed widgets) are dropped.
/// 2. A key already resolved is skipped, so the first occurrence wins and a
///    key present in both lists stays shown.
/// 3. Catalog widgets missing from both lists are appended to `shown` in
///    catalog order.
///
/// Existing order and hidden choices are never changed.
pub fn reconcile(persisted: &PersistedLayout, catalog: &WidgetCatalog) -> Layout {
    let mut known = HashSet::new();
    let mut shown = resolve(&persisted.shown, catalog, &mut known);
    let hidden = resolve(&persisted.hidden, catalog, &mut known);

    let added: Vec<&WidgetDescriptor> = catalog
        .all()
        .iter()
        .filter(|w| !known.contains(w.key.as_str()))
        .collect();
    if !added.is_empty() {
        tracing::info!(
            widgets = ?added.iter().map(|w| w.key.as_str()).collect::<Vec<_>>(),
            "Appending new widgets to layout"
        );
    }
    shown.extend(added.into_iter().cloned());

    Layout { shown, hidden }
}

fn resolve<'c>(
    keys: &[String],
    catalog: &'c WidgetCatalog,
    known: &mut HashSet<&'c str>,
) -> Vec<WidgetDescriptor> {
    let mut resolved = Vec::with_capacity(keys.len());
    for key in keys {
        match catalog.find(key) {
            Some(widget) => {
                if known.insert(widget.key.as_str()) {
                    resolved.push(widget.clone());
                } else {
                    tracing::debug!(key = %key, "Skipping duplicate layout key");
                }
            }
            None => tracing::debug!(key = %key, "Dropping unknown widget key"),
        }
    }
    resolved
}

/// Layout for a session with nothing persisted.
///
/// Restricted devices start with desktop-only widgets hidden; everything
/// else is shown in catalog order.
pub fn first_run(catalog: &WidgetCatalog, device: DeviceClass) -> Layout {
    if !device.is_restricted() {
        return default_layout(catalog);
    }

    let (hidden, shown): (Vec<_>, Vec<_>) = catalog
        .all()
        .iter()
        .cloned()
        .partition(|w| w.device_restricted);
    Layout { shown, hidden }
}

/// Every catalog widget shown in catalog order, nothing hidden.
pub fn default_layout(catalog: &WidgetCatalog) -> Layout {
    Layout {
        shown: catalog.all().to_vec(),
        hidden: Vec::new(),
    }
}
