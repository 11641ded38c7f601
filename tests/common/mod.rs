use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use tokenbot::config::AppConfig;
use tokenbot::AppState;

/// In-process stand-in for the Birdeye token endpoint.
#[derive(Clone, Default)]
pub struct MockBirdeye {
    tokens: Arc<Mutex<HashMap<String, Value>>>,
}

#[allow(dead_code)]
impl MockBirdeye {
    pub fn set_token(&self, address: &str, data: Value) {
        self.tokens.lock().unwrap().insert(address.into(), data);
    }

    pub fn set_price(&self, address: &str, price: f64) {
        let mut tokens = self.tokens.lock().unwrap();
        if let Some(data) = tokens.get_mut(address) {
            data["price_usd"] = json!(price);
        }
    }

    pub fn remove_token(&self, address: &str) {
        self.tokens.lock().unwrap().remove(address);
    }
}

/// In-process stand-in for the Telegram Bot API; records every message text.
#[derive(Clone, Default)]
pub struct MockTelegram {
    messages: Arc<Mutex<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockTelegram {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

async fn birdeye_token(State(mock): State<MockBirdeye>, Path(address): Path<String>) -> Response {
    let data = mock.tokens.lock().unwrap().get(&address).cloned();
    match data {
        Some(d) => Json(json!({ "success": true, "data": d })).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "success": false }))).into_response(),
    }
}

async fn telegram_send(
    State(mock): State<MockTelegram>,
    Path(_bot): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if mock.failing.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let text = body["text"].as_str().unwrap_or_default().to_string();
    mock.messages.lock().unwrap().push(text);
    Json(json!({ "ok": true })).into_response()
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("mock server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

pub async fn spawn_birdeye() -> (MockBirdeye, String) {
    let mock = MockBirdeye::default();
    let router = Router::new()
        .route("/public/token/:address", get(birdeye_token))
        .with_state(mock.clone());
    (mock, serve(router).await)
}

pub async fn spawn_telegram() -> (MockTelegram, String) {
    let mock = MockTelegram::default();
    let router = Router::new()
        .route("/:bot/sendMessage", post(telegram_send))
        .with_state(mock.clone());
    (mock, serve(router).await)
}

/// Raw Birdeye token data that scores 7 (mixed number/string encodings on purpose).
#[allow(dead_code)]
pub fn healthy_token(name: &str, price: f64) -> Value {
    json!({
        "symbol": "ALP",
        "name": name,
        "price_usd": price,
        "volume_15m": "5000",
        "liquidity": 8000,
        "holders": 150,
    })
}

pub struct TestHarness {
    pub state: AppState,
    pub birdeye: MockBirdeye,
    pub telegram: MockTelegram,
}

/// Wire an `AppState` against fresh mock servers.
#[allow(dead_code)]
pub async fn setup(api_token: Option<&str>) -> TestHarness {
    let (birdeye, birdeye_url) = spawn_birdeye().await;
    let (telegram, telegram_url) = spawn_telegram().await;

    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        birdeye_api_url: birdeye_url,
        birdeye_api_key: Some("test-key".into()),
        telegram_api_url: telegram_url,
        telegram_bot_token: Some("TEST_TOKEN".into()),
        telegram_chat_id: Some("42".into()),
        api_token: api_token.map(str::to_string),
        http_timeout_secs: 5,
    };
    assert!(config.has_telegram());

    let state = AppState::from_config(config, tokenbot::metrics::init_metrics());

    TestHarness {
        state,
        birdeye,
        telegram,
    }
}
