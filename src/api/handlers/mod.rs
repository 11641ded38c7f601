pub mod health;
pub mod metrics;
pub mod positions;
pub mod webhook;
