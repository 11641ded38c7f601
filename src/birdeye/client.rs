use std::time::Duration;

use metrics::counter;
use reqwest::Client;
use thiserror::Error;

use super::types::TokenResponse;
use crate::models::TokenSnapshot;

pub const BIRDEYE_API_BASE: &str = "https://public-api.birdeye.so";

#[derive(Debug, Error)]
pub enum BirdeyeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response carried no token data or reported failure")]
    MissingData,
}

/// Token metadata client for the Birdeye public API.
#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BirdeyeClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build Birdeye HTTP client, using defaults");
                Client::new()
            });

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Fetch the current snapshot for a token.
    pub async fn get_token(&self, address: &str) -> Result<TokenSnapshot, BirdeyeError> {
        let url = format!("{}/public/token/{}", self.base_url, address);

        let mut req = self.http.get(&url);
        if let Some(key) = &self.api_key {
            req = req.header("X-API-KEY", key);
        }

        let resp: TokenResponse = req.send().await?.error_for_status()?.json().await?;
        let data = resp.into_data().ok_or(BirdeyeError::MissingData)?;

        Ok(data.into_snapshot(address))
    }

    /// Fetch a snapshot, substituting an empty one on any failure.
    /// An empty snapshot scores zero and so can never trigger a buy.
    pub async fn fetch_snapshot(&self, address: &str) -> TokenSnapshot {
        match self.get_token(address).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                counter!("snapshot_fetch_failures_total").increment(1);
                tracing::warn!(error = %e, token = %address, "Token metadata fetch failed, using empty snapshot");
                TokenSnapshot::empty(address)
            }
        }
    }
}
