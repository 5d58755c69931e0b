pub mod conditions;
pub mod registry;
pub mod store;

// Re-exports for convenience
pub use conditions::{Condition, default_condition, now_ms};
pub use registry::{ConditionListener, ConditionRegistry};
pub use store::{StateStore, default_store_path};
