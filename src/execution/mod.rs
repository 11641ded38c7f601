pub mod decision_engine;
pub mod position_store;

pub use decision_engine::{Decision, DecisionEngine, SkipReason, BUY_THRESHOLD};
pub use position_store::{PositionStore, Step};
