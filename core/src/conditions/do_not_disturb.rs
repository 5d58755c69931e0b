use statusdeck_types::{ConditionKind, StatePayload, SystemSnapshot};

use super::{BaseState, Condition};

const KEY_TOTAL_SILENCE: &str = "total_silence";

/// Active while do-not-disturb is engaged.
///
/// Also remembers whether the host was in total-silence mode, so the
/// dashboard can word the advisory correctly across a restart.
#[derive(Debug, Default)]
pub struct DoNotDisturbCondition {
    state: BaseState,
    total_silence: bool,
}

impl DoNotDisturbCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_silence(&self) -> bool {
        self.total_silence
    }
}

impl Condition for DoNotDisturbCondition {
    fn kind(&self) -> ConditionKind {
        ConditionKind::DoNotDisturb
    }

    fn refresh_state(&mut self, snapshot: &SystemSnapshot) -> bool {
        let silence_changed = self.total_silence != snapshot.dnd_total_silence;
        self.total_silence = snapshot.dnd_total_silence;

        let active_changed = self.state.set_active(snapshot.dnd_on, super::now_ms());

        // A silence-mode flip only matters while the condition is shown
        active_changed || (silence_changed && self.state.active)
    }

    fn set_active(&mut self, active: bool, now_ms: i64) -> bool {
        self.state.set_active(active, now_ms)
    }

    fn restore_state(&mut self, payload: &StatePayload) {
        self.state.restore(payload);
        if let Some(total_silence) = payload.get_bool(KEY_TOTAL_SILENCE) {
            self.total_silence = total_silence;
        }
    }

    fn save_state(&self, payload: &mut StatePayload) -> bool {
        self.state.save(payload);
        payload.set_bool(KEY_TOTAL_SILENCE, self.total_silence);
        self.state.has_ever_changed()
    }

    fn is_active(&self) -> bool {
        self.state.active
    }

    fn last_change(&self) -> i64 {
        self.state.last_change
    }
}
