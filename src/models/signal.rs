use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a tracked position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellReason {
    /// Price fell back to the hold-drop threshold after the hold signal fired.
    DropAfterProfit,
    /// Unconditional stop-loss.
    Loss,
}

impl SellReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SellReason::DropAfterProfit => "drop_after_profit",
            SellReason::Loss => "loss",
        }
    }
}

impl fmt::Display for SellReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound recommendation produced by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    Buy {
        score: u8,
    },
    Hold {
        price: f64,
        change_percent: f64,
    },
    Sell {
        price: f64,
        change_percent: f64,
        reason: SellReason,
    },
}

impl Signal {
    /// Short label used for logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Signal::Buy { .. } => "buy",
            Signal::Hold { .. } => "hold",
            Signal::Sell { .. } => "sell",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy { score } => write!(f, "BUY score={score}"),
            Signal::Hold {
                price,
                change_percent,
            } => write!(f, "HOLD price={price} change={change_percent:.2}%"),
            Signal::Sell {
                price,
                change_percent,
                reason,
            } => write!(f, "SELL price={price} change={change_percent:.2}% reason={reason}"),
        }
    }
}
