use std::sync::OnceLock;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and register all application metrics.
/// Safe to call more than once: every call returns the handle of the one
/// globally installed recorder, whose `render()` produces the scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE.get_or_init(install).clone()
}

fn install() -> PrometheusHandle {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    if metrics::set_global_recorder(recorder).is_err() {
        tracing::warn!("A global metrics recorder was already installed; /metrics will be empty");
    }

    // Pre-register counters so they appear even before the first increment.
    counter!("webhook_events_total").absolute(0);
    counter!("snapshot_fetch_failures_total").absolute(0);
    counter!("notifications_failed_total").absolute(0);
    for kind in ["buy", "hold", "sell"] {
        counter!("signals_emitted_total", "kind" => kind).absolute(0);
    }
    for reason in ["missing_price", "invalid_buy_price"] {
        counter!("evaluations_skipped_total", "reason" => reason).absolute(0);
    }

    gauge!("tracked_positions").set(0.0);

    // Histogram is lazily created on first record; force creation.
    histogram!("pipeline_latency_seconds").record(0.0);

    handle
}
