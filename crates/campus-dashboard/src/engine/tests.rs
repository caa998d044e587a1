use super::*;
use crate::catalog::WidgetDescriptor;
use crate::layout::decode_keys;
use layout_store::{MemoryStore, StoreError};
use std::collections::HashSet;

fn abc() -> WidgetCatalog {
    WidgetCatalog::new(vec![
        WidgetDescriptor::new("a", "A"),
        WidgetDescriptor::new("b", "B"),
        WidgetDescriptor::desktop_only("c", "C"),
    ])
    .expect("valid catalog")
}

fn store_with(shown: Option<&str>, hidden: Option<&str>) -> MemoryStore {
    let mut entries = Vec::new();
    if let Some(raw) = shown {
        entries.push((SHOWN_KEY, raw));
    }
    if let Some(raw) = hidden {
        entries.push((HIDDEN_KEY, raw));
    }
    MemoryStore::from_entries(entries)
}

fn persisted_keys(store: &MemoryStore, key: &'static str) -> Option<Vec<String>> {
    store
        .read(key)
        .expect("memory store never fails")
        .map(|raw| decode_keys(key, &raw).expect("engine writes valid JSON"))
}

fn engine_with(shown: &str, hidden: &str) -> PersonalizationEngine<MemoryStore> {
    PersonalizationEngine::load(
        store_with(Some(shown), Some(hidden)),
        abc(),
        DeviceClass::Desktop,
    )
}

fn assert_invariants<S: LayoutStore>(engine: &PersonalizationEngine<S>) {
    let layout = engine.current_layout();
    let shown: HashSet<&str> = layout.shown_keys().into_iter().collect();
    let hidden: HashSet<&str> = layout.hidden_keys().into_iter().collect();
    assert!(shown.is_disjoint(&hidden), "shown and hidden overlap");
    assert_eq!(shown.len(), layout.shown().len(), "duplicate shown key");
    assert_eq!(hidden.len(), layout.hidden().len(), "duplicate hidden key");
    let all: HashSet<&str> = shown.union(&hidden).copied().collect();
    let catalog: HashSet<&str> = engine.catalog().keys().collect();
    assert_eq!(all, catalog, "layout does not cover the catalog");
}

/// Store whose writes always fail.
#[derive(Default)]
struct ReadOnlyStore {
    inner: MemoryStore,
    failed_writes: usize,
}

impl LayoutStore for ReadOnlyStore {
    fn read(&self, key: &str) -> layout_store::Result<Option<String>> {
        self.inner.read(key)
    }

    fn write(&mut self, _key: &str, _value: &str) -> layout_store::Result<()> {
        self.failed_writes += 1;
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only store",
        )))
    }

    fn remove(&mut self, _key: &str) -> layout_store::Result<()> {
        Ok(())
    }
}

/// Store that rejects writes to the hidden list only.
struct HiddenKeyRejectingStore {
    inner: MemoryStore,
}

impl LayoutStore for HiddenKeyRejectingStore {
    fn read(&self, key: &str) -> layout_store::Result<Option<String>> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> layout_store::Result<()> {
        if key == HIDDEN_KEY {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.write(key, value)
    }

    fn remove(&mut self, key: &str) -> layout_store::Result<()> {
        self.inner.remove(key)
    }
}

/// Store whose reads always fail.
struct BrokenStore;

impl LayoutStore for BrokenStore {
    fn read(&self, _key: &str) -> layout_store::Result<Option<String>> {
        Err(StoreError::Parse("unreadable".to_string()))
    }

    fn write(&mut self, _key: &str, _value: &str) -> layout_store::Result<()> {
        Ok(())
    }

    fn remove(&mut self, _key: &str) -> layout_store::Result<()> {
        Ok(())
    }
}

// -- load ---------------------------------------------------------------

#[test]
fn test_load_empty_store_desktop_shows_all_without_writing() {
    let engine = PersonalizationEngine::load(MemoryStore::new(), abc(), DeviceClass::Desktop);
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b", "c"]);
    assert!(engine.current_layout().hidden().is_empty());
    assert!(engine.store().is_empty(), "first run must not persist");
}

#[test]
fn test_load_empty_store_mobile_hides_restricted() {
    let engine = PersonalizationEngine::load(MemoryStore::new(), abc(), DeviceClass::Mobile);
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b"]);
    assert_eq!(engine.current_layout().hidden_keys(), vec!["c"]);
    assert_invariants(&engine);
}

#[test]
fn test_load_current_schema_does_not_write() {
    let store = store_with(Some(r#"["b","a"]"#), Some(r#"["c"]"#));
    let before = store.clone();
    let engine = PersonalizationEngine::load(store, abc(), DeviceClass::Desktop);
    assert_eq!(engine.current_layout().shown_keys(), vec!["b", "a"]);
    assert_eq!(engine.current_layout().hidden_keys(), vec!["c"]);
    assert_eq!(engine.store(), &before, "loading must not touch the store");
}

#[test]
fn test_load_legacy_layout_is_split_and_rewritten() {
    let store = store_with(Some(r#"["a","b","hidden-below","c"]"#), None);
    let engine = PersonalizationEngine::load(store, abc(), DeviceClass::Desktop);

    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b"]);
    assert_eq!(engine.current_layout().hidden_keys(), vec!["c"]);
    assert_eq!(
        persisted_keys(engine.store(), SHOWN_KEY),
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(
        persisted_keys(engine.store(), HIDDEN_KEY),
        Some(vec!["c".to_string()])
    );
}

#[test]
fn test_load_legacy_rewrite_happens_once() {
    let store = store_with(Some(r#"["b","hidden-below","a"]"#), None);
    let first = PersonalizationEngine::load(store, abc(), DeviceClass::Desktop);
    let migrated = first.into_store();

    let second = PersonalizationEngine::load(migrated.clone(), abc(), DeviceClass::Desktop);
    assert_eq!(second.store(), &migrated, "second load must be a no-op");
    assert_eq!(second.current_layout().shown_keys(), vec!["b", "c"]);
    assert_eq!(second.current_layout().hidden_keys(), vec!["a"]);
}

#[test]
fn test_load_appends_new_widget() {
    let engine = engine_with(r#"["a"]"#, r#"["b"]"#);
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "c"]);
    assert_eq!(engine.current_layout().hidden_keys(), vec!["b"]);
    assert_invariants(&engine);
}

#[test]
fn test_load_new_widget_ignores_device_class() {
    let store = store_with(Some(r#"["a"]"#), Some(r#"["b"]"#));
    let engine = PersonalizationEngine::load(store, abc(), DeviceClass::Mobile);
    assert_eq!(
        engine.current_layout().shown_keys(),
        vec!["a", "c"],
        "restricted filtering only applies on first run"
    );
}

#[test]
fn test_load_corrupt_shown_falls_back_to_first_run() {
    let store = store_with(Some("{{not json"), Some("[]"));
    let engine = PersonalizationEngine::load(store, abc(), DeviceClass::Mobile);
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b"]);
    assert_eq!(engine.current_layout().hidden_keys(), vec!["c"]);
}

#[test]
fn test_load_corrupt_hidden_falls_back_to_first_run() {
    let engine = engine_with(r#"["c"]"#, "42");
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b", "c"]);
    assert!(engine.current_layout().hidden().is_empty());
}

#[test]
fn test_load_unreadable_store_falls_back_to_first_run() {
    let engine = PersonalizationEngine::load(BrokenStore, abc(), DeviceClass::Desktop);
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b", "c"]);
}

// -- move_entry ---------------------------------------------------------

#[test]
fn test_move_up_shifts_entry() {
    let mut engine = engine_with(r#"["a","b","c"]"#, "[]");
    assert!(engine.move_entry(1, Direction::Up));
    assert_eq!(engine.current_layout().shown_keys(), vec!["b", "a", "c"]);
    assert_eq!(
        persisted_keys(engine.store(), SHOWN_KEY),
        Some(vec!["b".to_string(), "a".to_string(), "c".to_string()])
    );
}

#[test]
fn test_move_down_shifts_entry() {
    let mut engine = engine_with(r#"["a","b","c"]"#, "[]");
    assert!(engine.move_entry(0, Direction::Down));
    assert_eq!(engine.current_layout().shown_keys(), vec!["b", "a", "c"]);
}

#[test]
fn test_move_first_up_is_noop() {
    let mut engine = engine_with(r#"["a","b","c"]"#, "[]");
    let before = engine.store().clone();
    assert!(!engine.move_entry(0, Direction::Up));
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b", "c"]);
    assert_eq!(engine.store(), &before, "no-op must not write");
}

#[test]
fn test_move_last_down_is_noop() {
    let mut engine = engine_with(r#"["a","b","c"]"#, "[]");
    assert!(!engine.move_entry(2, Direction::Down));
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b", "c"]);
}

#[test]
fn test_move_out_of_range_index_is_noop() {
    let mut engine = engine_with(r#"["a","b","c"]"#, "[]");
    assert!(!engine.move_entry(3, Direction::Up));
    assert!(!engine.move_entry(usize::MAX, Direction::Down));
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b", "c"]);
}

#[test]
fn test_move_on_single_entry_is_noop() {
    let mut engine = engine_with(r#"["a"]"#, r#"["b","c"]"#);
    assert!(!engine.move_entry(0, Direction::Up));
    assert!(!engine.move_entry(0, Direction::Down));
}

#[test]
fn test_move_does_not_touch_hidden() {
    let mut engine = engine_with(r#"["a","b"]"#, r#"["c"]"#);
    engine.move_entry(0, Direction::Down);
    assert_eq!(engine.current_layout().hidden_keys(), vec!["c"]);
}

// -- hide_entry / restore_entry -----------------------------------------

#[test]
fn test_hide_appends_to_hidden() {
    let mut engine = engine_with(r#"["a","b"]"#, r#"["c"]"#);
    assert!(engine.hide_entry("a"));
    assert_eq!(engine.current_layout().shown_keys(), vec!["b"]);
    assert_eq!(engine.current_layout().hidden_keys(), vec!["c", "a"]);
    assert_eq!(
        persisted_keys(engine.store(), HIDDEN_KEY),
        Some(vec!["c".to_string(), "a".to_string()])
    );
    assert_invariants(&engine);
}

#[test]
fn test_hide_unknown_or_hidden_key_is_noop() {
    let mut engine = engine_with(r#"["a","b"]"#, r#"["c"]"#);
    let before = engine.store().clone();
    assert!(!engine.hide_entry("zzz"));
    assert!(!engine.hide_entry("c"));
    assert_eq!(engine.store(), &before);
}

#[test]
fn test_hide_then_restore_appends_at_end() {
    let mut engine = engine_with(r#"["a","b"]"#, r#"["c"]"#);
    engine.hide_entry("a");
    let index = engine
        .current_layout()
        .hidden_index_of("a")
        .expect("a is hidden");
    assert!(engine.restore_entry(index));
    assert_eq!(engine.current_layout().shown_keys(), vec!["b", "a"]);
    assert_eq!(engine.current_layout().hidden_keys(), vec!["c"]);
    assert_invariants(&engine);
}

#[test]
fn test_restore_out_of_range_is_noop() {
    let mut engine = engine_with(r#"["a","b"]"#, r#"["c"]"#);
    let before = engine.current_layout().clone();
    assert!(!engine.restore_entry(1));
    assert!(!engine.restore_entry(usize::MAX));
    assert_eq!(engine.current_layout(), &before);
}

#[test]
fn test_restore_from_empty_hidden_is_noop() {
    let mut engine = engine_with(r#"["a","b","c"]"#, "[]");
    assert!(!engine.restore_entry(0));
}

// -- reset_to_default ---------------------------------------------------

#[test]
fn test_reset_restores_catalog_order() {
    let mut engine = engine_with(r#"["c","a"]"#, r#"["b"]"#);
    engine.reset_to_default();
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b", "c"]);
    assert!(engine.current_layout().hidden().is_empty());
    assert_eq!(
        persisted_keys(engine.store(), HIDDEN_KEY),
        Some(Vec::new()),
        "reset persists an empty hidden list"
    );
}

#[test]
fn test_reset_ignores_device_class() {
    let mut engine = PersonalizationEngine::load(MemoryStore::new(), abc(), DeviceClass::Mobile);
    engine.reset_to_default();
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "b", "c"]);
}

// -- write failures -----------------------------------------------------

#[test]
fn test_failed_write_keeps_in_memory_change() {
    let mut engine =
        PersonalizationEngine::load(ReadOnlyStore::default(), abc(), DeviceClass::Desktop);
    assert!(engine.hide_entry("b"));
    assert_eq!(engine.current_layout().shown_keys(), vec!["a", "c"]);
    assert_eq!(engine.current_layout().hidden_keys(), vec!["b"]);
    assert_eq!(
        engine.store().failed_writes,
        1,
        "the batch stops at the first failed write"
    );
}

#[test]
fn test_failed_hidden_write_does_not_leave_half_a_change() {
    let store = HiddenKeyRejectingStore {
        inner: store_with(Some(r#"["a","b","c"]"#), Some("[]")),
    };
    let mut engine = PersonalizationEngine::load(store, abc(), DeviceClass::Desktop);
    assert!(engine.hide_entry("a"));
    assert_eq!(engine.current_layout().hidden_keys(), vec!["a"]);

    let store = engine.into_store();
    assert_eq!(
        persisted_keys(&store.inner, SHOWN_KEY),
        Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
        "shown list must be restored when the hidden write fails"
    );

    let reloaded = PersonalizationEngine::load(store, abc(), DeviceClass::Desktop);
    assert_eq!(reloaded.current_layout().shown_keys(), vec!["a", "b", "c"]);
    assert!(reloaded.current_layout().hidden().is_empty());
}

// -- invariants across a session ----------------------------------------

enum Op {
    Hide(&'static str),
    Move(usize, Direction),
    Restore(usize),
    Reset,
}

#[test]
fn test_invariants_hold_across_mixed_operations() {
    let mut engine = PersonalizationEngine::load(
        MemoryStore::new(),
        WidgetCatalog::builtin(),
        DeviceClass::Mobile,
    );
    assert_invariants(&engine);

    let steps = [
        Op::Hide("library"),
        Op::Move(3, Direction::Up),
        Op::Restore(0),
        Op::Hide("install"),
        Op::Move(0, Direction::Up),
        Op::Restore(99),
        Op::Hide("install"),
        Op::Reset,
        Op::Hide("mensa"),
    ];

    for step in steps {
        match step {
            Op::Hide(key) => {
                engine.hide_entry(key);
            }
            Op::Move(index, direction) => {
                engine.move_entry(index, direction);
            }
            Op::Restore(index) => {
                engine.restore_entry(index);
            }
            Op::Reset => engine.reset_to_default(),
        }
        assert_invariants(&engine);
    }
}

#[test]
fn test_state_survives_reload() {
    let mut engine = engine_with(r#"["a","b","c"]"#, "[]");
    engine.move_entry(2, Direction::Up);
    engine.hide_entry("a");
    let expected = engine.current_layout().clone();

    let reloaded = PersonalizationEngine::load(engine.into_store(), abc(), DeviceClass::Mobile);
    assert_eq!(reloaded.current_layout(), &expected);
}

#[test]
fn test_engine_over_borrowed_store() {
    let mut store = MemoryStore::new();
    {
        let mut engine = PersonalizationEngine::load(&mut store, abc(), DeviceClass::Desktop);
        engine.hide_entry("c");
    }
    assert_eq!(persisted_keys(&store, HIDDEN_KEY), Some(vec!["c".to_string()]));
}

// -- Direction ----------------------------------------------------------

#[test]
fn test_direction_parse_and_display() {
    assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
    assert_eq!("DOWN".parse::<Direction>(), Ok(Direction::Down));
    assert_eq!("+1".parse::<Direction>(), Ok(Direction::Down));
    assert_eq!("-1".parse::<Direction>(), Ok(Direction::Up));
    assert!("sideways".parse::<Direction>().is_err());
    assert!("2".parse::<Direction>().is_err());
    assert_eq!(Direction::Up.to_string(), "up");
    assert_eq!(Direction::Down.offset(), 1);
}
