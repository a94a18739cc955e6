//! Pipeline metrics
//!
//! Recorded through the `metrics` facade; they are dropped unless the
//! binary installs a recorder.

use std::time::Duration;
use tourist_webhook_core::Collection;

pub const ERRORS_TOTAL: &str = "webhook_errors_total";
pub const STORE_LATENCY_SECONDS: &str = "webhook_store_latency_seconds";
pub const NOT_FOUND_TOTAL: &str = "webhook_not_found_total";

/// Time spent in one store query, including timed-out ones
pub fn record_store_latency(elapsed: Duration) {
    metrics::histogram!(STORE_LATENCY_SECONDS).record(elapsed.as_secs_f64());
}

pub fn record_not_found(collection: Collection) {
    metrics::counter!(NOT_FOUND_TOTAL, "collection" => collection.as_str()).increment(1);
}

pub fn record_error(kind: &'static str) {
    metrics::counter!(ERRORS_TOTAL, "kind" => kind).increment(1);
}
