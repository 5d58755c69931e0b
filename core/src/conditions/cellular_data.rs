use statusdeck_types::{ConditionKind, StatePayload, SystemSnapshot};

use super::{BaseState, Condition};

/// Active while cellular data is switched off on a device that has it.
///
/// Like hotspot, this is live state the host re-probes every refresh;
/// persisting it would only preserve a guess.
#[derive(Debug, Default)]
pub struct CellularDataCondition {
    state: BaseState,
}

impl CellularDataCondition {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Condition for CellularDataCondition {
    fn kind(&self) -> ConditionKind {
        ConditionKind::CellularData
    }

    fn refresh_state(&mut self, snapshot: &SystemSnapshot) -> bool {
        self.state
            .set_active(snapshot.cellular_data_off, super::now_ms())
    }

    fn set_active(&mut self, active: bool, now_ms: i64) -> bool {
        self.state.set_active(active, now_ms)
    }

    fn restore_state(&mut self, _payload: &StatePayload) {
        // Never persisted; nothing to restore
    }

    fn save_state(&self, _payload: &mut StatePayload) -> bool {
        false
    }

    fn is_active(&self) -> bool {
        self.state.active
    }

    fn last_change(&self) -> i64 {
        self.state.last_change
    }
}
