//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint body.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

/// Outcome of the one recorder installation attempt.
static METRICS_HANDLE: OnceLock<Result<PrometheusHandle, String>> = OnceLock::new();

/// Install the Prometheus recorder. Concurrent and repeated calls share the
/// result of a single installation attempt.
pub fn init_metrics() -> Result<(), AppError> {
    METRICS_HANDLE
        .get_or_init(|| {
            PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map(|_| ())
        .map_err(|e| {
            AppError::InternalError(anyhow::anyhow!(
                "Failed to install Prometheus recorder: {}",
                e
            ))
        })
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .and_then(|installed| installed.as_ref().ok())
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count one `/ask` outcome (`answered`, `rejected`, `upstream_error`).
pub fn record_ask(mode: &'static str, outcome: &'static str) {
    counter!("ask_requests_total", "mode" => mode, "outcome" => outcome).increment(1);
}
