use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// In-memory record of a token the bot has recommended buying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedPosition {
    /// Price at which tracking began. Never mutated.
    pub buy_price: f64,
    /// Highest price observed since tracking began.
    pub peak_price: f64,
    /// Score at entry time.
    pub score: u8,
    /// One-way flag, set once the hold signal has been emitted.
    pub hold_alert_sent: bool,
    pub opened_at: DateTime<Utc>,
    pub last_checked: DateTime<Utc>,
}

impl TrackedPosition {
    pub fn open(price: f64, score: u8, now: DateTime<Utc>) -> Self {
        Self {
            buy_price: price,
            peak_price: price,
            score,
            hold_alert_sent: false,
            opened_at: now,
            last_checked: now,
        }
    }

    /// Percentage change of `price` relative to the entry price.
    /// `None` when the entry price cannot serve as a divisor.
    pub fn change_percent(&self, price: f64) -> Option<f64> {
        if self.buy_price.is_finite() && self.buy_price > 0.0 {
            Some((price - self.buy_price) / self.buy_price * 100.0)
        } else {
            None
        }
    }
}

/// Read-only view of a tracked position, keyed by token address.
#[derive(Debug, Clone, Serialize)]
pub struct PositionView {
    pub token: String,
    #[serde(flatten)]
    pub position: TrackedPosition,
}
