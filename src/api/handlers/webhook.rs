use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::ingestion::process_token_event;
use crate::AppState;

/// Inbound token-created event. Only the token address is required.
#[derive(Debug, Deserialize)]
pub struct TokenCreatedEvent {
    #[serde(default)]
    pub account: Option<String>,
}

/// POST /webhook/token_created: run the pipeline for the announced token.
///
/// Any event that names a token is acknowledged, whatever happens downstream.
pub async fn token_created(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let event: TokenCreatedEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;

    let address = event
        .account
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing `account` field".into()))?;

    tracing::info!(token = %address, "Token created event received");

    process_token_event(
        &address,
        &state.birdeye,
        &state.engine,
        state.notifier.as_deref(),
    )
    .await;

    Ok(Json(json!({ "status": "received" })))
}
