//! Prometheus metrics for the campus paths service.
//!
//! - [`MetricsConfig`]: whether to install the recorder
//! - [`init_metrics`]: install the Prometheus recorder once at startup
//! - [`metrics_handler`]: axum handler rendering the exposition text
//! - `record_*` helpers for path lookups
//!
//! # Example
//!
//! ```no_run
//! use campuspaths_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! init_metrics(&MetricsConfig::default()).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` ("false" disables; anything else enables).
    pub fn from_env() -> Self {
        Self::from_value(std::env::var("METRICS_ENABLED").ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        let enabled = value.map(|v| !v.eq_ignore_ascii_case("false")).unwrap_or(true);
        Self { enabled }
    }
}

/// Install the Prometheus recorder.
///
/// # Errors
///
/// Fails if metrics are disabled, if a recorder is already installed, or if
/// the exporter cannot be built.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// `GET /metrics`: Prometheus exposition text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Count a path lookup that produced a route.
pub fn record_path_calculated(service: &str) {
    metrics::counter!(
        "campuspaths_paths_calculated_total",
        "service" => service.to_string()
    )
    .increment(1);
}

/// Count a failed path lookup.
///
/// `reason` is one of "validation_error", "unknown_building", "no_path" or
/// "internal_error".
pub fn record_path_failed(reason: &str, service: &str) {
    metrics::counter!(
        "campuspaths_paths_failed_total",
        "reason" => reason.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record how many segments a returned path has.
pub fn record_path_segments(segments: usize) {
    metrics::histogram!("campuspaths_path_segments").record(segments as f64);
}

/// Count a building list request.
pub fn record_buildings_listed(service: &str) {
    metrics::counter!(
        "campuspaths_buildings_listed_total",
        "service" => service.to_string()
    )
    .increment(1);
}
