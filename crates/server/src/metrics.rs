//! Prometheus metrics
//!
//! The recorder is installed once per process. Pipeline metrics
//! (store latency, not-found and error counters) are recorded by the agent
//! crate through the same facade.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use tourist_webhook_core::Intent;

pub const REQUESTS_TOTAL: &str = "webhook_requests_total";

/// Label for intents outside the dispatch table
const UNRECOGNIZED_ACTION: &str = "unrecognized";

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Later calls return the same handle.
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    let handle = PROMETHEUS.get_or_try_init(|| PrometheusBuilder::new().install_recorder());
    match handle {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        },
    }
}

/// Count one webhook call. Unknown actions share one label.
pub fn record_request(intent: &Intent) {
    let action = if intent.is_recognized() {
        intent.action().to_string()
    } else {
        UNRECOGNIZED_ACTION.to_string()
    };
    ::metrics::counter!(REQUESTS_TOTAL, "action" => action).increment(1);
}

pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS.get() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            "metrics disabled\n".to_string(),
        ),
    }
}
