use statusdeck_types::{ConditionKind, StatePayload, SystemSnapshot};

use super::{BaseState, Condition};

/// Active while the host reports airplane mode enabled.
#[derive(Debug, Default)]
pub struct AirplaneModeCondition {
    state: BaseState,
}

impl AirplaneModeCondition {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Condition for AirplaneModeCondition {
    fn kind(&self) -> ConditionKind {
        ConditionKind::AirplaneMode
    }

    fn refresh_state(&mut self, snapshot: &SystemSnapshot) -> bool {
        self.state
            .set_active(snapshot.airplane_mode_on, super::now_ms())
    }

    fn set_active(&mut self, active: bool, now_ms: i64) -> bool {
        self.state.set_active(active, now_ms)
    }

    fn restore_state(&mut self, payload: &StatePayload) {
        self.state.restore(payload);
    }

    fn save_state(&self, payload: &mut StatePayload) -> bool {
        self.state.save(payload);
        self.state.has_ever_changed()
    }

    fn is_active(&self) -> bool {
        self.state.active
    }

    fn last_change(&self) -> i64 {
        self.state.last_change
    }
}
