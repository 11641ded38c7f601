use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use metrics::gauge;

use crate::AppState;

/// GET /metrics: Prometheus scrape payload.
pub async fn render(State(state): State<AppState>) -> impl IntoResponse {
    // Refresh so the gauge is right even if no event arrived since startup.
    gauge!("tracked_positions").set(state.engine.store().len() as f64);

    let body = state.metrics_handle.render();
    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
