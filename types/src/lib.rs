pub mod kind;
pub mod payload;
pub mod snapshot;

pub use kind::ConditionKind;
pub use payload::{PayloadValue, StatePayload};
pub use snapshot::{ConditionSummary, SystemSnapshot};
