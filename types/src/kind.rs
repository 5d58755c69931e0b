//! The closed catalog of condition kinds
//!
//! Every condition the registry can ever hold is enumerated here. The
//! persisted state file tags entries with the stable string tag, so tags
//! must never be renamed once shipped.

use serde::{Deserialize, Serialize};

/// Identifies one monitorable system aspect. Exactly one condition instance
/// per kind exists in a fully constructed registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    AirplaneMode,
    Hotspot,
    DoNotDisturb,
    BatterySaver,
    CellularData,
    BackgroundData,
    WorkMode,
}

impl ConditionKind {
    /// Full catalog in canonical insertion order. Registry construction
    /// appends missing kinds in this order, which also fixes tie-break
    /// ordering for conditions that have never changed.
    pub const ALL: [ConditionKind; 7] = [
        ConditionKind::AirplaneMode,
        ConditionKind::Hotspot,
        ConditionKind::DoNotDisturb,
        ConditionKind::BatterySaver,
        ConditionKind::CellularData,
        ConditionKind::BackgroundData,
        ConditionKind::WorkMode,
    ];

    /// Stable tag used in the persisted state file.
    pub fn tag(self) -> &'static str {
        match self {
            ConditionKind::AirplaneMode => "airplane_mode",
            ConditionKind::Hotspot => "hotspot",
            ConditionKind::DoNotDisturb => "do_not_disturb",
            ConditionKind::BatterySaver => "battery_saver",
            ConditionKind::CellularData => "cellular_data",
            ConditionKind::BackgroundData => "background_data",
            ConditionKind::WorkMode => "work_mode",
        }
    }

    /// Resolve a persisted tag back to a kind. Unknown tags are a data
    /// error for the caller to skip, never a panic.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    /// Human-readable name for dashboard rows.
    pub fn display_name(self) -> &'static str {
        match self {
            ConditionKind::AirplaneMode => "Airplane mode",
            ConditionKind::Hotspot => "Hotspot",
            ConditionKind::DoNotDisturb => "Do not disturb",
            ConditionKind::BatterySaver => "Battery saver",
            ConditionKind::CellularData => "Cellular data",
            ConditionKind::BackgroundData => "Background data",
            ConditionKind::WorkMode => "Work mode",
        }
    }
}
