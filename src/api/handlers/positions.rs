use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::PositionView;
use crate::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// GET /api/positions: tracked positions, oldest first.
pub async fn list(State(state): State<AppState>) -> Json<ApiResponse<Vec<PositionView>>> {
    Json(ApiResponse {
        success: true,
        data: Some(state.engine.store().list()),
        error: None,
    })
}
