use std::time::Duration;

use metrics::counter;
use serde_json::json;

use crate::models::{SellReason, Signal, TokenSnapshot};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram notification service. Failures are logged but never block the main flow.
#[derive(Debug, Clone)]
pub struct Notifier {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl Notifier {
    pub fn new(api_base: impl Into<String>, bot_token: String, chat_id: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build Telegram HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bot_token,
            chat_id,
        }
    }

    /// Send a Telegram message. Returns whether Telegram accepted it;
    /// failures are logged as warnings and otherwise ignored.
    pub async fn send(&self, message: &str) -> bool {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);

        let body = json!({
            "chat_id": self.chat_id,
            "text": message,
            "parse_mode": "Markdown",
        });

        let delivered = match self.http.post(&url).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::warn!(
                    status = %resp.status(),
                    "Telegram sendMessage returned non-2xx"
                );
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to send Telegram notification");
                false
            }
        };

        if !delivered {
            counter!("notifications_failed_total").increment(1);
        }
        delivered
    }

    /// Render and deliver a signal for the given token.
    pub async fn deliver(&self, snapshot: &TokenSnapshot, signal: &Signal) -> bool {
        self.send(&format_signal(snapshot, signal)).await
    }
}

pub fn format_signal(snapshot: &TokenSnapshot, signal: &Signal) -> String {
    match signal {
        Signal::Buy { score } => format_buy(snapshot, *score),
        Signal::Hold {
            price,
            change_percent,
        } => format_hold(snapshot, *price, *change_percent),
        Signal::Sell {
            price,
            change_percent,
            reason,
        } => format_sell(snapshot, *price, *change_percent, *reason),
    }
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${p}"),
        None => "n/a".into(),
    }
}

/// Format a buy recommendation.
pub fn format_buy(snapshot: &TokenSnapshot, score: u8) -> String {
    format!(
        "🟢 *Buy Suggestion*\nToken: {}\nScore: {}\nCurrent price: {}\n🔗 [Birdeye](https://birdeye.so/token/{}?chain=solana)",
        snapshot.display_label(),
        score,
        format_price(snapshot.price_usd),
        snapshot.address,
    )
}

/// Format the one-shot hold notice.
pub fn format_hold(snapshot: &TokenSnapshot, price: f64, change_percent: f64) -> String {
    format!(
        "🟡 *Hold a Little Longer*\nToken: {}\nCurrent price: ${}\nProfit: {:.2}%\nConsider keeping the position open.",
        snapshot.display_label(),
        price,
        change_percent,
    )
}

pub fn format_sell(
    snapshot: &TokenSnapshot,
    price: f64,
    change_percent: f64,
    reason: SellReason,
) -> String {
    format!(
        "🔴 *Sell Suggestion*\nToken: {}\nCurrent price: ${}\nChange: {:.2}%\nReason: {}",
        snapshot.display_label(),
        price,
        change_percent,
        reason_text(reason),
    )
}

pub fn reason_text(reason: SellReason) -> &'static str {
    match reason {
        SellReason::DropAfterProfit => "Dropped below +20% after profit",
        SellReason::Loss => "Loss of -25% or worse",
    }
}

pub fn format_startup() -> String {
    "✅ Bot started successfully. Watching new tokens for potential 🚀".into()
}
