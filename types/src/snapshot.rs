//! Host-facing data carriers
//!
//! `SystemSnapshot` is sampled by the host and fed to `refresh_all`; the
//! registry never probes system state itself. `ConditionSummary` is the
//! serializable row shape dashboards consume.

use serde::{Deserialize, Serialize};

use crate::kind::ConditionKind;

/// One sample of the host-observed flags every condition derives its
/// active state from. Defaults are "nothing advisory is going on".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub airplane_mode_on: bool,
    pub hotspot_on: bool,
    pub dnd_on: bool,
    /// Do-not-disturb is suppressing everything, not just notifications
    pub dnd_total_silence: bool,
    pub battery_saver_on: bool,
    pub cellular_data_off: bool,
    pub background_data_restricted: bool,
    pub work_mode_paused: bool,
}

/// Snapshot row of one condition's observable state, in registry sort
/// order. The dashboard decides its own display order from `last_change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub kind: ConditionKind,
    pub active: bool,
    pub visible: bool,
    /// Epoch milliseconds of the most recent state transition; 0 if the
    /// condition has never changed.
    pub last_change: i64,
}
