use statusdeck_types::{ConditionKind, StatePayload, SystemSnapshot};

use super::{BaseState, Condition};

/// Active while battery saver is on.
#[derive(Debug, Default)]
pub struct BatterySaverCondition {
    state: BaseState,
}

impl BatterySaverCondition {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Condition for BatterySaverCondition {
    fn kind(&self) -> ConditionKind {
        ConditionKind::BatterySaver
    }

    fn refresh_state(&mut self, snapshot: &SystemSnapshot) -> bool {
        self.state
            .set_active(snapshot.battery_saver_on, super::now_ms())
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
