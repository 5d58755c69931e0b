use statusdeck_types::{ConditionKind, StatePayload, SystemSnapshot};

use super::{BaseState, Condition};

/// Active while the host reports a tethering hotspot running.
///
/// Hotspot state is re-probed from the host on every refresh, so this
/// condition never persists itself; a stale "hotspot on" entry surviving
/// a reboot would be plain wrong.
#[derive(Debug, Default)]
pub struct HotspotCondition {
    state: BaseState,
}

impl HotspotCondition {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Condition for HotspotCondition {
    fn kind(&self) -> ConditionKind {
        ConditionKind::Hotspot
    }

    fn refresh_state(&mut self, snapshot: &SystemSnapshot) -> bool {
        self.state.set_active(snapshot.hotspot_on, super::now_ms())
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
