pub mod position;
pub mod signal;
pub mod snapshot;

pub use position::{PositionView, TrackedPosition};
pub use signal::{SellReason, Signal};
pub use snapshot::TokenSnapshot;
