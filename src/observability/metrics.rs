//! Metrics collection and exposition.
//!
//! # Metrics
//! - `outcome_layer_responses_total` (counter): responses rendered by the adapter, by status
//! - `outcome_layer_failures_total` (counter): unexpected handler failures, by kind

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const RESPONSES_TOTAL: &str = "outcome_layer_responses_total";
pub const FAILURES_TOTAL: &str = "outcome_layer_failures_total";

/// Start the Prometheus scrape endpoint and install it as global recorder.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Count a response rendered by the adapter.
pub fn record_response(status: u16) {
    ::metrics::counter!(RESPONSES_TOTAL, "status" => status.to_string()).increment(1);
}

/// Count an unexpected handler failure.
pub fn record_failure(kind: &'static str) {
    ::metrics::counter!(FAILURES_TOTAL, "kind" => kind).increment(1);
}
