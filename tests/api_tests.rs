mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use tokenbot::api::router::create_router;

const TOKEN: &str = "AlphaMint1111111111111111111111111111111111";

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn webhook_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhook/token_created")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_root_banner() {
    let h = common::setup(None).await;
    let app = create_router(h.state.clone());

    let resp = app.oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert!(json["message"].as_str().unwrap().contains("/webhook/token_created"));
}

#[tokio::test]
async fn test_health_check() {
    let h = common::setup(None).await;
    let app = create_router(h.state.clone());

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["tracked_positions"], 0);
    assert_eq!(json["notifications"], true);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let h = common::setup(None).await;
    let app = create_router(h.state.clone());

    let resp = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/plain; version=0.0.4"
    );

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("webhook_events_total"));
    assert!(text.contains("tracked_positions"));
}

#[test]
fn test_metrics_handle_is_shared() {
    // Both handles read the one installed recorder, so both see registered metrics.
    let first = tokenbot::metrics::init_metrics();
    let second = tokenbot::metrics::init_metrics();
    assert!(first.render().contains("signals_emitted_total"));
    assert!(second.render().contains("signals_emitted_total"));
}

#[tokio::test]
async fn test_webhook_acknowledges_unknown_token() {
    let h = common::setup(None).await;
    let app = create_router(h.state.clone());

    let resp = app
        .oneshot(webhook_request(r#"{"account": "NoSuchMint"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "received");
    assert!(h.state.engine.store().is_empty());
}

#[tokio::test]
async fn test_webhook_buy_is_listed_in_positions() {
    let h = common::setup(None).await;
    h.birdeye.set_token(TOKEN, common::healthy_token("Alpha", 0.25));
    let app = create_router(h.state.clone());

    let body = format!(r#"{{"account": "{TOKEN}", "signature": "abc"}}"#);
    let resp = app.clone().oneshot(webhook_request(&body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get("/api/positions")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["token"], TOKEN);
    assert_eq!(data[0]["buy_price"], 0.25);
    assert_eq!(data[0]["peak_price"], 0.25);
    assert_eq!(data[0]["score"], 7);
    assert_eq!(data[0]["hold_alert_sent"], false);

    assert_eq!(h.telegram.messages().len(), 1);
}

#[tokio::test]
async fn test_webhook_missing_account_is_bad_request() {
    let h = common::setup(None).await;
    let app = create_router(h.state.clone());

    let resp = app
        .clone()
        .oneshot(webhook_request(r#"{"mint": "x"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["success"], false);

    let resp = app.oneshot(webhook_request(r#"{"account": "  "}"#)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_invalid_json_is_bad_request() {
    let h = common::setup(None).await;
    let app = create_router(h.state.clone());

    let resp = app.oneshot(webhook_request("not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_positions_require_token_when_configured() {
    let h = common::setup(Some("secret")).await;
    let app = create_router(h.state.clone());

    let resp = app.clone().oneshot(get("/api/positions")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/positions")
                .header("authorization", "Bearer wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/positions")
                .header("authorization", "Bearer secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_webhook_stays_open_when_api_token_set() {
    let h = common::setup(Some("secret")).await;
    let app = create_router(h.state.clone());

    let resp = app
        .oneshot(webhook_request(r#"{"account": "NoSuchMint"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
