//! The condition registry
//!
//! Owns the canonical condition list, drives persistence, keeps the list
//! sorted by recency and fans out change notifications. All mutation goes
//! through `&mut self`, which is what makes the dispatch path safe: a
//! listener cannot re-enter the registry while a notification is in
//! flight, so there is no reentrancy guard to get wrong.

#[cfg(test)]
mod registry_tests;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use statusdeck_types::{ConditionKind, ConditionSummary, StatePayload, SystemSnapshot};

use crate::conditions::{Condition, default_condition, now_ms};
use crate::store::StateStore;

/// Observer of registry changes. Notified with no arguments; re-query
/// [`ConditionRegistry::conditions`] or [`ConditionRegistry::snapshot`]
/// to learn the new state.
pub trait ConditionListener {
    fn on_conditions_changed(&self);
}

/// Process-wide owner of all condition instances.
///
/// Constructed explicitly by the host and passed by reference to
/// consumers; there is no global instance. Construction loads the
/// persisted state file, fills in catalog entries the file lacked and
/// sorts the result by `last_change` ascending.
///
/// Listener registrations are weak: the registry holds an association,
/// never ownership, and a listener dropped by the host simply stops
/// being invoked.
pub struct ConditionRegistry {
    conditions: Vec<Box<dyn Condition>>,
    listeners: Vec<Weak<dyn ConditionListener>>,
    store: StateStore,
}

impl ConditionRegistry {
    /// Build a registry backed by the state file at `store_path`.
    ///
    /// A missing or unreadable file is not an error; the registry starts
    /// from an all-default catalog.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        let store = StateStore::new(store_path);

        let mut conditions: Vec<Box<dyn Condition>> = Vec::with_capacity(ConditionKind::ALL.len());
        for (kind, payload) in store.load() {
            if conditions.iter().any(|c| c.kind() == kind) {
                tracing::warn!(kind = kind.tag(), "duplicate entry in state file, skipping");
                continue;
            }
            let mut condition = default_condition(kind);
            condition.restore_state(&payload);
            conditions.push(condition);
        }

        let mut registry = Self {
            conditions,
            listeners: Vec::new(),
            store,
        };
        registry.add_missing_conditions();
        registry.sort_conditions();
        registry
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    // --- Lifecycle & Catalog ---

    /// Append a default condition for every catalog kind not yet present.
    /// Idempotent: a complete registry is left untouched.
    fn add_missing_conditions(&mut self) {
        for kind in ConditionKind::ALL {
            if self.condition(kind).is_none() {
                tracing::debug!(kind = kind.tag(), "adding missing condition");
                self.conditions.push(default_condition(kind));
            }
        }
    }

    /// Stable sort by `last_change` ascending; ties keep their current
    /// relative order (catalog insertion order for fresh defaults).
    fn sort_conditions(&mut self) {
        self.conditions.sort_by_key(|c| c.last_change());
    }

    /// Re-evaluate every condition against a fresh host snapshot, in
    /// current sort order, then run the change pipeline once per
    /// condition that reported a change.
    pub fn refresh_all(&mut self, snapshot: &SystemSnapshot) {
        let mut changed = Vec::new();
        for condition in &mut self.conditions {
            if condition.refresh_state(snapshot) {
                changed.push(condition.kind());
            }
        }
        for kind in changed {
            self.notify_changed(kind);
        }
    }

    /// Flip one condition's active flag directly (dashboard actions).
    /// No-op, including no notification, if the flag already had that
    /// value.
    pub fn set_active(&mut self, kind: ConditionKind, active: bool) {
        let now = now_ms();
        let changed = self
            .conditions
            .iter_mut()
            .find(|c| c.kind() == kind)
            .map(|c| c.set_active(active, now))
            .unwrap_or(false);
        if changed {
            self.notify_changed(kind);
        }
    }

    // --- Change Pipeline ---

    /// Record that `kind`'s observable state changed: persist the full
    /// current state, re-sort by recency, then invoke every live
    /// listener in registration order.
    pub fn notify_changed(&mut self, kind: ConditionKind) {
        tracing::debug!(kind = kind.tag(), "condition changed");
        self.persist();
        self.sort_conditions();
        self.dispatch();
    }

    /// Write every condition that asks to be persisted. Write failures
    /// are logged inside the store; in-memory state stays authoritative.
    fn persist(&self) {
        let mut entries = Vec::with_capacity(self.conditions.len());
        for condition in &self.conditions {
            let mut payload = StatePayload::new();
            if condition.save_state(&mut payload) {
                entries.push((condition.kind(), payload));
            }
        }
        self.store.save(&entries);
    }

    fn dispatch(&mut self) {
        // Iterate a copy of the registrations so a callback that adds or
        // removes listeners elsewhere can never shift this dispatch
        let registered: Vec<Weak<dyn ConditionListener>> = self.listeners.clone();
        for weak in registered {
            if let Some(listener) = weak.upgrade() {
                listener.on_conditions_changed();
            }
        }
        self.listeners.retain(|w| w.strong_count() > 0);
    }

    // --- Listeners ---

    /// Register a listener. No deduplication: registering the same
    /// listener twice means it is invoked twice per change.
    pub fn add_listener(&mut self, listener: &Arc<dyn ConditionListener>) {
        self.listeners.push(Arc::downgrade(listener));
    }

    /// Remove the first registration of `listener`, if any. A listener
    /// registered twice keeps its second registration.
    pub fn remove_listener(&mut self, listener: &Arc<dyn ConditionListener>) {
        let target = Arc::downgrade(listener);
        if let Some(pos) = self.listeners.iter().position(|w| Weak::ptr_eq(w, &target)) {
            self.listeners.remove(pos);
        }
    }

    // --- Queries ---

    /// Exact-kind lookup. `None` only if the kind is somehow absent;
    /// after construction every catalog kind is present.
    pub fn condition(&self, kind: ConditionKind) -> Option<&dyn Condition> {
        self.conditions
            .iter()
            .find(|c| c.kind() == kind)
            .map(|c| c.as_ref())
    }

    /// All conditions in current sort order (by `last_change` ascending).
    /// The borrow prevents the order shifting underneath an iteration.
    pub fn conditions(&self) -> impl Iterator<Item = &dyn Condition> {
        self.conditions.iter().map(|c| c.as_ref())
    }

    /// Conditions currently warranting display, preserving sort order.
    pub fn visible_conditions(&self) -> impl Iterator<Item = &dyn Condition> {
        self.conditions().filter(|c| c.should_show())
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Immutable serializable copy of the current state, one row per
    /// condition in sort order. This is what host UIs should retain.
    pub fn snapshot(&self) -> Vec<ConditionSummary> {
        self.conditions
            .iter()
            .map(|c| ConditionSummary {
                kind: c.kind(),
                active: c.is_active(),
                visible: c.should_show(),
                last_change: c.last_change(),
            })
            .collect()
    }
}
