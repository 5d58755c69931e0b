//! Tests for the condition registry
//!
//! Covers catalog completion, recency ordering, persistence behavior and
//! listener fan-out.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use statusdeck_types::{ConditionKind, StatePayload, SystemSnapshot};

use super::{ConditionListener, ConditionRegistry};
use crate::store::StateStore;

fn store_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("condition_state.json")
}

/// Seed a state file with one persisted condition before the registry
/// under test is constructed.
fn seed_entry(dir: &tempfile::TempDir, kind: ConditionKind, active: bool, last_change: i64) {
    let mut payload = StatePayload::new();
    payload.set_bool("active", active);
    payload.set_int("last_change", last_change);
    StateStore::new(store_path(dir)).save(&[(kind, payload)]);
}

struct RecordingListener {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingListener {
    fn new(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Arc<dyn ConditionListener> {
        Arc::new(Self {
            name,
            log: Arc::clone(log),
        })
    }
}

impl ConditionListener for RecordingListener {
    fn on_conditions_changed(&self) {
        self.log.lock().unwrap().push(self.name);
    }
}

#[test]
fn test_fresh_registry_has_full_catalog_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ConditionRegistry::new(store_path(&dir));

    assert_eq!(registry.condition_count(), ConditionKind::ALL.len());
    let kinds: Vec<ConditionKind> = registry.conditions().map(|c| c.kind()).collect();
    // All defaults tie at last_change 0; stable sort keeps catalog order
    assert_eq!(kinds, ConditionKind::ALL.to_vec());
    for condition in registry.conditions() {
        assert!(!condition.is_active());
        assert_eq!(condition.last_change(), 0);
    }
    assert_eq!(registry.visible_conditions().count(), 0);
}

#[test]
fn test_catalog_completion_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));

    registry.add_missing_conditions();
    registry.add_missing_conditions();
    assert_eq!(registry.condition_count(), ConditionKind::ALL.len());

    // And every kind appears exactly once
    for kind in ConditionKind::ALL {
        let count = registry.conditions().filter(|c| c.kind() == kind).count();
        assert_eq!(count, 1, "{kind:?}");
    }
}

#[test]
fn test_persisted_entry_restores_and_sorts_last() {
    let dir = tempfile::tempdir().unwrap();
    seed_entry(&dir, ConditionKind::BatterySaver, true, 1000);

    let registry = ConditionRegistry::new(store_path(&dir));
    assert_eq!(registry.condition_count(), ConditionKind::ALL.len());

    let battery = registry.condition(ConditionKind::BatterySaver).unwrap();
    assert!(battery.is_active());
    assert_eq!(battery.last_change(), 1000);

    // Everything else defaults to last_change 0, so battery saver is the
    // most recent entry and sorts last
    let last = registry.conditions().last().unwrap();
    assert_eq!(last.kind(), ConditionKind::BatterySaver);
}

#[test]
fn test_duplicate_file_entries_yield_one_instance() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir);
    std::fs::write(
        &path,
        r#"{
            "version": 1,
            "conditions": [
                {"kind": "battery_saver", "state": {"active": true, "last_change": 10}},
                {"kind": "battery_saver", "state": {"active": false, "last_change": 20}}
            ]
        }"#,
    )
    .unwrap();

    let registry = ConditionRegistry::new(path);
    assert_eq!(registry.condition_count(), ConditionKind::ALL.len());
    // First entry wins
    let battery = registry.condition(ConditionKind::BatterySaver).unwrap();
    assert!(battery.is_active());
    assert_eq!(battery.last_change(), 10);
}

#[test]
fn test_set_active_reorders_by_recency() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));

    registry.set_active(ConditionKind::AirplaneMode, true);
    let last = registry.conditions().last().unwrap();
    assert_eq!(last.kind(), ConditionKind::AirplaneMode);

    // Stamps have millisecond resolution; force distinct values
    std::thread::sleep(std::time::Duration::from_millis(2));
    registry.set_active(ConditionKind::WorkMode, true);
    let kinds: Vec<ConditionKind> = registry.conditions().map(|c| c.kind()).collect();
    assert_eq!(kinds[kinds.len() - 1], ConditionKind::WorkMode);

    // Whole list stays ascending by last_change
    let stamps: Vec<i64> = registry.conditions().map(|c| c.last_change()).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut registry = ConditionRegistry::new(store_path(&dir));
    registry.set_active(ConditionKind::BatterySaver, true);
    let stamp = registry
        .condition(ConditionKind::BatterySaver)
        .unwrap()
        .last_change();
    drop(registry);

    let reloaded = ConditionRegistry::new(store_path(&dir));
    let battery = reloaded.condition(ConditionKind::BatterySaver).unwrap();
    assert!(battery.is_active());
    assert_eq!(battery.last_change(), stamp);
}

#[test]
fn test_declining_conditions_stay_out_of_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));

    // Hotspot changes state, which triggers a save of the full set
    registry.set_active(ConditionKind::Hotspot, true);
    registry.set_active(ConditionKind::BatterySaver, true);

    let persisted = StateStore::new(store_path(&dir)).load();
    let kinds: Vec<ConditionKind> = persisted.iter().map(|(k, _)| *k).collect();
    assert!(kinds.contains(&ConditionKind::BatterySaver));
    assert!(!kinds.contains(&ConditionKind::Hotspot));
    assert!(!kinds.contains(&ConditionKind::CellularData));

    // But the hotspot condition is live in memory
    assert!(
        registry
            .condition(ConditionKind::Hotspot)
            .unwrap()
            .is_active()
    );
}

#[test]
fn test_listener_fan_out_in_registration_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));

    let log = Arc::new(Mutex::new(Vec::new()));
    let a = RecordingListener::new("a", &log);
    let b = RecordingListener::new("b", &log);

    registry.add_listener(&a);
    registry.add_listener(&b);
    registry.add_listener(&b); // duplicate registration is deliberate

    registry.set_active(ConditionKind::AirplaneMode, true);
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "b"]);
}

#[test]
fn test_no_op_set_active_does_not_notify() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));

    let log = Arc::new(Mutex::new(Vec::new()));
    let listener = RecordingListener::new("l", &log);
    registry.add_listener(&listener);

    // Already inactive; flag value unchanged
    registry.set_active(ConditionKind::BatterySaver, false);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_remove_listener_drops_first_registration_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));

    let log = Arc::new(Mutex::new(Vec::new()));
    let a = RecordingListener::new("a", &log);
    registry.add_listener(&a);
    registry.add_listener(&a);
    registry.remove_listener(&a);

    registry.set_active(ConditionKind::WorkMode, true);
    assert_eq!(*log.lock().unwrap(), vec!["a"]);
}

#[test]
fn test_dropped_listener_is_never_invoked() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));

    let log = Arc::new(Mutex::new(Vec::new()));
    let kept = RecordingListener::new("kept", &log);
    registry.add_listener(&kept);
    {
        let dropped = RecordingListener::new("dropped", &log);
        registry.add_listener(&dropped);
    }

    registry.set_active(ConditionKind::DoNotDisturb, true);
    assert_eq!(*log.lock().unwrap(), vec!["kept"]);
}

#[test]
fn test_refresh_all_notifies_once_per_changed_condition() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));

    let log = Arc::new(Mutex::new(Vec::new()));
    let listener = RecordingListener::new("l", &log);
    registry.add_listener(&listener);

    let snap = SystemSnapshot {
        airplane_mode_on: true,
        battery_saver_on: true,
        ..SystemSnapshot::default()
    };
    registry.refresh_all(&snap);
    assert_eq!(log.lock().unwrap().len(), 2);

    assert!(
        registry
            .condition(ConditionKind::AirplaneMode)
            .unwrap()
            .is_active()
    );
    assert!(
        registry
            .condition(ConditionKind::BatterySaver)
            .unwrap()
            .is_active()
    );

    // Same snapshot again: nothing changed, nobody notified
    log.lock().unwrap().clear();
    registry.refresh_all(&snap);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_visible_conditions_filter_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));

    registry.set_active(ConditionKind::WorkMode, true);
    std::thread::sleep(std::time::Duration::from_millis(2));
    registry.set_active(ConditionKind::AirplaneMode, true);

    let visible: Vec<ConditionKind> = registry.visible_conditions().map(|c| c.kind()).collect();
    assert_eq!(
        visible,
        vec![ConditionKind::WorkMode, ConditionKind::AirplaneMode]
    );
    assert_eq!(registry.condition_count(), ConditionKind::ALL.len());
}

#[test]
fn test_lookup_covers_whole_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ConditionRegistry::new(store_path(&dir));

    for kind in ConditionKind::ALL {
        let condition = registry.condition(kind).unwrap();
        assert_eq!(condition.kind(), kind);
    }
}

#[test]
fn test_snapshot_mirrors_registry_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ConditionRegistry::new(store_path(&dir));
    registry.set_active(ConditionKind::CellularData, true);

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.len(), ConditionKind::ALL.len());
    assert_eq!(snapshot.last().unwrap().kind, ConditionKind::CellularData);
    assert!(snapshot.last().unwrap().active);
    assert!(snapshot.last().unwrap().visible);

    let from_iter: Vec<ConditionKind> = registry.conditions().map(|c| c.kind()).collect();
    let from_snapshot: Vec<ConditionKind> = snapshot.iter().map(|s| s.kind).collect();
    assert_eq!(from_iter, from_snapshot);
}

#[test]
fn test_write_failure_keeps_memory_authoritative() {
    let dir = tempfile::tempdir().unwrap();
    // The "file" is an existing directory, so every save fails
    let mut registry = ConditionRegistry::new(dir.path());

    let log = Arc::new(Mutex::new(Vec::new()));
    let listener = RecordingListener::new("l", &log);
    registry.add_listener(&listener);

    registry.set_active(ConditionKind::BatterySaver, true);

    // Save failed silently; the change still took effect and dispatched
    assert!(
        registry
            .condition(ConditionKind::BatterySaver)
            .unwrap()
            .is_active()
    );
    assert_eq!(log.lock().unwrap().len(), 1);
}
