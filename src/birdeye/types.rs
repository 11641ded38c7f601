use serde::Deserialize;
use serde_json::Value;

use crate::models::TokenSnapshot;

// ---------------------------------------------------------------------------
// Token endpoint (`/public/token/{address}`)
// ---------------------------------------------------------------------------

/// Response envelope. Other top-level fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<TokenData>,
}

impl TokenResponse {
    /// Token data, unless the API explicitly reported `success: false`.
    pub fn into_data(self) -> Option<TokenData> {
        match self.success {
            Some(false) => None,
            _ => self.data,
        }
    }
}

/// Raw token fields. Kept as untyped JSON so one badly typed field
/// cannot fail decoding of the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenData {
    #[serde(default)]
    pub symbol: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub price_usd: Option<Value>,
    #[serde(default)]
    pub volume_15m: Option<Value>,
    #[serde(default)]
    pub liquidity: Option<Value>,
    #[serde(default)]
    pub holders: Option<Value>,
}

impl TokenData {
    pub fn into_snapshot(self, address: &str) -> TokenSnapshot {
        TokenSnapshot::from_raw_fields(
            address,
            self.symbol.as_ref(),
            self.name.as_ref(),
            self.price_usd.as_ref(),
            self.volume_15m.as_ref(),
            self.liquidity.as_ref(),
            self.holders.as_ref(),
        )
    }
}
