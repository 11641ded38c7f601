use metrics::{counter, gauge, histogram};
use std::time::Instant;

use crate::birdeye::BirdeyeClient;
use crate::execution::{Decision, DecisionEngine};
use crate::intelligence::score_token;
use crate::models::Signal;
use crate::services::notifier::Notifier;

/// Process one token event through the pipeline:
/// 1. Fetch the token snapshot (fails soft to an empty snapshot)
/// 2. Score it
/// 3. Run the decision engine (state is committed here)
/// 4. Deliver the resulting signal, best effort
///
/// Never fails: every outcome is logged and the caller always acknowledges the event.
pub async fn process_token_event(
    address: &str,
    birdeye: &BirdeyeClient,
    engine: &DecisionEngine,
    notifier: Option<&Notifier>,
) -> Option<Signal> {
    let start = Instant::now();
    counter!("webhook_events_total").increment(1);

    // Step 1: Fetch snapshot
    let snapshot = birdeye.fetch_snapshot(address).await;

    // Step 2: Score
    let score = score_token(&snapshot);
    tracing::debug!(token = %address, score, snapshot = %snapshot, "Token scored");

    // Step 3: Decide. No await happens while the position is locked.
    let decision = engine.decide(&snapshot, score, chrono::Utc::now());
    gauge!("tracked_positions").set(engine.store().len() as f64);

    let signal = match decision {
        Decision::Emit(signal) => signal,
        Decision::NoAction => {
            histogram!("pipeline_latency_seconds").record(start.elapsed().as_secs_f64());
            return None;
        }
        Decision::Skipped(reason) => {
            counter!("evaluations_skipped_total", "reason" => reason.as_str()).increment(1);
            histogram!("pipeline_latency_seconds").record(start.elapsed().as_secs_f64());
            return None;
        }
    };

    counter!("signals_emitted_total", "kind" => signal.kind()).increment(1);
    tracing::info!(
        token = %address,
        symbol = snapshot.symbol.as_deref().unwrap_or("?"),
        signal = %signal,
        "Signal emitted"
    );

    // Step 4: Notify. Delivery failure never touches the position store.
    match notifier {
        Some(n) => {
            if !n.deliver(&snapshot, &signal).await {
                tracing::warn!(token = %address, kind = signal.kind(), "Signal notification not delivered");
            }
        }
        None => {
            tracing::debug!(token = %address, "Notifier disabled, signal only logged");
        }
    }

    histogram!("pipeline_latency_seconds").record(start.elapsed().as_secs_f64());
    Some(signal)
}

/// Send the one-time startup message. Failure is swallowed.
pub async fn announce_startup(notifier: Option<&Notifier>) {
    let Some(n) = notifier else {
        tracing::info!("Telegram not configured, skipping startup notification");
        return;
    };

    if n.send(&crate::services::notifier::format_startup()).await {
        tracing::info!("Startup notification sent");
    } else {
        tracing::warn!("Startup notification could not be delivered");
    }
}
