use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A point-in-time market observation for a single token.
///
/// Numeric fields are `None` when the upstream value was missing or could
/// not be read as a non-negative finite number. Consumers treat `None` as
/// "does not meet any threshold".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub address: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price_usd: Option<f64>,
    pub volume_15m: Option<f64>,
    pub liquidity: Option<f64>,
    pub holders: Option<u64>,
}

impl TokenSnapshot {
    /// Snapshot substituted when metadata could not be fetched.
    pub fn empty(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Build a snapshot from raw upstream field values, one field at a time.
    /// A malformed field never poisons the others.
    pub fn from_raw_fields(
        address: impl Into<String>,
        symbol: Option<&Value>,
        name: Option<&Value>,
        price_usd: Option<&Value>,
        volume_15m: Option<&Value>,
        liquidity: Option<&Value>,
        holders: Option<&Value>,
    ) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.and_then(lenient_string),
            name: name.and_then(lenient_string),
            price_usd: price_usd.and_then(lenient_f64),
            volume_15m: volume_15m.and_then(lenient_f64),
            liquidity: liquidity.and_then(lenient_f64),
            holders: holders.and_then(lenient_u64),
        }
    }

    /// `SYMBOL (Name)` with placeholders for missing parts.
    pub fn display_label(&self) -> String {
        format!(
            "{} ({})",
            self.symbol.as_deref().unwrap_or("?"),
            self.name.as_deref().unwrap_or("unknown"),
        )
    }
}

impl fmt::Display for TokenSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token: address={} label={} price={:?} volume_15m={:?} liquidity={:?} holders={:?}",
            self.address,
            self.display_label(),
            self.price_usd,
            self.volume_15m,
            self.liquidity,
            self.holders,
        )
    }
}

/// Accepts a JSON number or a numeric string. Rejects negatives and non-finite values.
pub fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}

/// Accepts a non-negative integer, an integral float, or a string holding either.
pub fn lenient_u64(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }

    let f = lenient_f64(value)?;
    (f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
