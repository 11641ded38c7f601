use chrono::{DateTime, Utc};

use crate::execution::position_store::{PositionStore, Step};
use crate::models::{SellReason, Signal, TokenSnapshot, TrackedPosition};

/// Minimum score required to open a tracked position.
pub const BUY_THRESHOLD: u8 = 6;
/// Gain (in %) at which the one-shot hold signal fires.
pub const SELL_PROFIT_PERCENT: f64 = 30.0;
/// Drop (in percentage points) from the profit target that closes a position after the hold signal.
pub const SELL_DROP_FROM_PROFIT: f64 = 10.0;
/// Stop-loss (in %) relative to the entry price.
pub const SELL_LOSS_PERCENT: f64 = -25.0;
/// Change (in %) at or below which a position that already got its hold signal is sold.
pub const HOLD_DROP_THRESHOLD: f64 = SELL_PROFIT_PERCENT - SELL_DROP_FROM_PROFIT;

/// Why an evaluation left the store untouched without considering any rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Snapshot carried no usable price.
    MissingPrice,
    /// Stored entry price cannot be used as a divisor.
    InvalidBuyPrice,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingPrice => "missing_price",
            SkipReason::InvalidBuyPrice => "invalid_buy_price",
        }
    }
}

/// Full result of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Emit(Signal),
    NoAction,
    Skipped(SkipReason),
}

impl Decision {
    pub fn into_signal(self) -> Option<Signal> {
        match self {
            Decision::Emit(signal) => Some(signal),
            Decision::NoAction | Decision::Skipped(_) => None,
        }
    }
}

/// Ordered guard result for a tracked position. First match wins.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Guard {
    Hold,
    Sell(SellReason),
    Watch,
}

fn first_matching_guard(position: &TrackedPosition, change_percent: f64) -> Guard {
    if change_percent >= SELL_PROFIT_PERCENT && !position.hold_alert_sent {
        Guard::Hold
    } else if change_percent <= HOLD_DROP_THRESHOLD && position.hold_alert_sent {
        Guard::Sell(SellReason::DropAfterProfit)
    } else if change_percent <= SELL_LOSS_PERCENT {
        Guard::Sell(SellReason::Loss)
    } else {
        Guard::Watch
    }
}

/// Observed price, if the snapshot carries one. Zero is a real observation.
fn observed_price(snapshot: &TokenSnapshot) -> Option<f64> {
    snapshot.price_usd.filter(|p| p.is_finite() && *p >= 0.0)
}

/// Buy/hold/sell state machine over the position store.
#[derive(Clone, Default)]
pub struct DecisionEngine {
    store: PositionStore,
}

impl DecisionEngine {
    pub fn new(store: PositionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &PositionStore {
        &self.store
    }

    /// Evaluate one snapshot and return the signal to emit, if any.
    pub fn evaluate(&self, snapshot: &TokenSnapshot, score: u8) -> Option<Signal> {
        self.decide(snapshot, score, Utc::now()).into_signal()
    }

    /// Evaluate one snapshot at a given time.
    ///
    /// The state change is committed before this returns; callers deliver the
    /// resulting signal afterwards without holding any store lock.
    pub fn decide(&self, snapshot: &TokenSnapshot, score: u8, now: DateTime<Utc>) -> Decision {
        let token = snapshot.address.as_str();
        let price = observed_price(snapshot);

        self.store.transition(token, |slot| match slot {
            None => Self::decide_untracked(token, price, score, now),
            Some(position) => Self::decide_tracked(token, position, price, now),
        })
    }

    fn decide_untracked(
        token: &str,
        price: Option<f64>,
        score: u8,
        now: DateTime<Utc>,
    ) -> Step<Decision> {
        if score < BUY_THRESHOLD {
            tracing::debug!(token = %token, score, "Score below buy threshold");
            return Step::Keep(Decision::NoAction);
        }

        // Entry price must be a valid divisor for every later evaluation.
        let Some(price) = price.filter(|p| *p > 0.0) else {
            tracing::warn!(token = %token, score, "Qualifying score but no usable price, skipping buy");
            return Step::Keep(Decision::Skipped(SkipReason::MissingPrice));
        };

        tracing::info!(token = %token, score, price, "Opening tracked position");
        Step::Open(
            TrackedPosition::open(price, score, now),
            Decision::Emit(Signal::Buy { score }),
        )
    }

    fn decide_tracked(
        token: &str,
        position: &mut TrackedPosition,
        price: Option<f64>,
        now: DateTime<Utc>,
    ) -> Step<Decision> {
        let Some(price) = price else {
            tracing::warn!(token = %token, "Tracked token snapshot has no usable price, skipping");
            return Step::Keep(Decision::Skipped(SkipReason::MissingPrice));
        };

        let Some(change_percent) = position.change_percent(price) else {
            tracing::warn!(
                token = %token,
                buy_price = position.buy_price,
                "Tracked position has unusable buy price, skipping"
            );
            return Step::Keep(Decision::Skipped(SkipReason::InvalidBuyPrice));
        };

        if price > position.peak_price {
            position.peak_price = price;
        }
        position.last_checked = now;

        match first_matching_guard(position, change_percent) {
            Guard::Hold => {
                position.hold_alert_sent = true;
                tracing::info!(token = %token, price, change_percent, "Profit target reached, hold");
                Step::Keep(Decision::Emit(Signal::Hold {
                    price,
                    change_percent,
                }))
            }
            Guard::Sell(reason) => {
                tracing::info!(
                    token = %token,
                    price,
                    change_percent,
                    peak = position.peak_price,
                    reason = %reason,
                    "Sell condition met, closing position"
                );
                Step::Close(Decision::Emit(Signal::Sell {
                    price,
                    change_percent,
                    reason,
                }))
            }
            Guard::Watch => {
                tracing::debug!(
                    token = %token,
                    price,
                    change_percent,
                    "Position within thresholds"
                );
                Step::Keep(Decision::NoAction)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
