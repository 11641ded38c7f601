use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// GET /: liveness banner.
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Bot is running. Send POST requests to /webhook/token_created"
    }))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "tracked_positions": state.engine.store().len(),
            "notifications": state.notifier.is_some(),
        })),
    )
}
