use tokenbot::api::router::create_router;
use tokenbot::config::AppConfig;
use tokenbot::ingestion::announce_startup;
use tokenbot::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    if config.birdeye_api_key.is_none() {
        tracing::warn!("BIRDEYE_API_KEY not set: metadata requests will likely be rejected");
    }
    if !config.has_telegram() {
        tracing::warn!("TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID not set: signals will only be logged");
    }

    let metrics_handle = tokenbot::metrics::init_metrics();
    let state = AppState::from_config(config, metrics_handle);

    // Best-effort, never blocks startup on failure
    announce_startup(state.notifier.as_deref()).await;

    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .init();
}
