//! Condition capability contract and the fixed catalog
//!
//! Each condition owns its active flag, its recency timestamp and its
//! persisted payload. The registry never touches those fields directly:
//! it hands every condition a [`SystemSnapshot`] during refresh and asks
//! it to import/export payloads around persistence.

mod airplane_mode;
mod background_data;
mod battery_saver;
mod cellular_data;
mod do_not_disturb;
mod hotspot;
mod work_mode;

pub use airplane_mode::AirplaneModeCondition;
pub use background_data::BackgroundDataCondition;
pub use battery_saver::BatterySaverCondition;
pub use cellular_data::CellularDataCondition;
pub use do_not_disturb::DoNotDisturbCondition;
pub use hotspot::HotspotCondition;
pub use work_mode::WorkModeCondition;

use statusdeck_types::{ConditionKind, StatePayload, SystemSnapshot};

/// Current wall-clock time in epoch milliseconds, the resolution used for
/// every `last_change` stamp.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One monitorable system aspect.
///
/// Implementations are plain state machines over [`SystemSnapshot`]
/// fields; none of them perform I/O. All mutation flows back to the
/// registry as a `bool` "observable state changed" result so the registry
/// can run its persist/sort/notify pipeline.
pub trait Condition {
    /// Stable identifier, unique within the registry.
    fn kind(&self) -> ConditionKind;

    /// Re-evaluate against a fresh host snapshot. Returns whether the
    /// observable state changed.
    fn refresh_state(&mut self, snapshot: &SystemSnapshot) -> bool;

    /// Flip the active flag directly (dashboard actions). Returns whether
    /// the flag actually changed; an unchanged flag must not restamp
    /// `last_change`.
    fn set_active(&mut self, active: bool, now_ms: i64) -> bool;

    /// Populate internal fields from a previously saved payload. Must
    /// tolerate a payload lacking expected keys.
    fn restore_state(&mut self, payload: &StatePayload);

    /// Export internal fields into `payload`; return whether this
    /// condition wants to be persisted at all.
    fn save_state(&self, payload: &mut StatePayload) -> bool;

    fn is_active(&self) -> bool;

    /// Epoch milliseconds of the most recent state transition, 0 for a
    /// never-changed default. Drives registry sort order.
    fn last_change(&self) -> i64;

    /// Whether this condition currently warrants display.
    fn should_show(&self) -> bool {
        self.is_active()
    }
}

/// Active flag + recency stamp shared by every catalog condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseState {
    pub active: bool,
    pub last_change: i64,
}

impl BaseState {
    pub const KEY_ACTIVE: &'static str = "active";
    pub const KEY_LAST_CHANGE: &'static str = "last_change";

    /// Transition the active flag, stamping `last_change` only on a real
    /// transition. Returns whether anything changed.
    pub fn set_active(&mut self, active: bool, now_ms: i64) -> bool {
        if self.active == active {
            return false;
        }
        self.active = active;
        self.last_change = now_ms;
        true
    }

    pub fn restore(&mut self, payload: &StatePayload) {
        if let Some(active) = payload.get_bool(Self::KEY_ACTIVE) {
            self.active = active;
        }
        if let Some(last_change) = payload.get_int(Self::KEY_LAST_CHANGE) {
            self.last_change = last_change;
        }
    }

    pub fn save(&self, payload: &mut StatePayload) {
        payload.set_bool(Self::KEY_ACTIVE, self.active);
        payload.set_int(Self::KEY_LAST_CHANGE, self.last_change);
    }

    /// Whether there is anything worth writing to disk. A pristine
    /// default condition stays out of the state file entirely.
    pub fn has_ever_changed(&self) -> bool {
        self.active || self.last_change != 0
    }
}

/// Construct the default condition for a catalog kind.
///
/// The match is exhaustive over the closed catalog, so an "unexpected
/// condition type" failure path does not exist.
pub fn default_condition(kind: ConditionKind) -> Box<dyn Condition> {
    match kind {
        ConditionKind::AirplaneMode => Box::new(AirplaneModeCondition::new()),
        ConditionKind::Hotspot => Box::new(HotspotCondition::new()),
        ConditionKind::DoNotDisturb => Box::new(DoNotDisturbCondition::new()),
        ConditionKind::BatterySaver => Box::new(BatterySaverCondition::new()),
        ConditionKind::CellularData => Box::new(CellularDataCondition::new()),
        ConditionKind::BackgroundData => Box::new(BackgroundDataCondition::new()),
        ConditionKind::WorkMode => Box::new(WorkModeCondition::new()),
    }
}
