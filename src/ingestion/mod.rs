pub mod pipeline;

pub use pipeline::{announce_startup, process_token_event};
