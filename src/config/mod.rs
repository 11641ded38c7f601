use std::env;
use std::time::Duration;

use crate::birdeye::client::BIRDEYE_API_BASE;
use crate::services::notifier::TELEGRAM_API_BASE;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Birdeye metadata API
    pub birdeye_api_url: String,
    pub birdeye_api_key: Option<String>,

    // Telegram (optional, notifications are only logged when unset)
    pub telegram_api_url: String,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,

    /// Bearer token for the read-only `/api` routes. Empty disables auth.
    pub api_token: Option<String>,

    pub http_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".into())
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {e}"))?,

            birdeye_api_url: env::var("BIRDEYE_API_URL")
                .unwrap_or_else(|_| BIRDEYE_API_BASE.into()),
            birdeye_api_key: non_empty_var("BIRDEYE_API_KEY"),

            telegram_api_url: env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| TELEGRAM_API_BASE.into()),
            telegram_bot_token: non_empty_var("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: non_empty_var("TELEGRAM_CHAT_ID"),

            api_token: non_empty_var("API_TOKEN"),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),
        })
    }

    /// Returns true if both Telegram credentials are configured.
    pub fn has_telegram(&self) -> bool {
        self.telegram_bot_token.is_some() && self.telegram_chat_id.is_some()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
