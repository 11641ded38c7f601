pub mod api;
pub mod birdeye;
pub mod config;
pub mod errors;
pub mod execution;
pub mod ingestion;
pub mod intelligence;
pub mod metrics;
pub mod models;
pub mod services;

use std::sync::Arc;

use crate::birdeye::BirdeyeClient;
use crate::config::AppConfig;
use crate::execution::DecisionEngine;
use crate::services::notifier::Notifier;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub engine: DecisionEngine,
    pub birdeye: BirdeyeClient,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub notifier: Option<Arc<Notifier>>,
}

impl AppState {
    /// Wire collaborators from configuration with an empty position store.
    pub fn from_config(
        config: AppConfig,
        metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        let birdeye = BirdeyeClient::new(
            config.birdeye_api_url.clone(),
            config.birdeye_api_key.clone(),
            config.http_timeout(),
        );

        let notifier = match (&config.telegram_bot_token, &config.telegram_chat_id) {
            (Some(token), Some(chat_id)) => Some(Arc::new(Notifier::new(
                config.telegram_api_url.clone(),
                token.clone(),
                chat_id.clone(),
                config.http_timeout(),
            ))),
            _ => None,
        };

        Self {
            config,
            engine: DecisionEngine::default(),
            birdeye,
            metrics_handle,
            notifier,
        }
    }
}
