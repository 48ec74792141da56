//! Liveness and readiness probe handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Body returned by both health probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok", or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of buildings loaded (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildings_loaded: Option<usize>,

    /// Number of graph nodes loaded (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_loaded: Option<usize>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            buildings_loaded: None,
            nodes_loaded: None,
        }
    }

    pub fn ready(service: &str, version: &str, buildings: usize, nodes: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            buildings_loaded: Some(buildings),
            nodes_loaded: Some(nodes),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            buildings_loaded: None,
            nodes_loaded: None,
        }
    }
}

/// `GET /health/live`: 200 whenever the process is serving requests.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// `GET /health/ready`: 200 once at least one building is loaded, 503
/// otherwise.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"campuspaths-service-shared","version":"0.1.0","buildings_loaded":5,"nodes_loaded":6}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let campus = state.campus();
    if campus.building_count() == 0 {
        let status = HealthStatus::not_ready(service, version, "no buildings loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        service,
        version,
        campus.building_count(),
        campus.graph().node_count(),
    );
    (StatusCode::OK, Json(status)).into_response()
}
