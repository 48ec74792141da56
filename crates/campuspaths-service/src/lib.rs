//! Campus shortest-path HTTP service.
//!
//! # Endpoints
//!
//! - `GET /path?origin=<short>&destination=<short>` - Shortest walking path
//! - `GET /buildings` - Short name to long name for every building
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `CAMPUSPATHS_DATA_DIR` - Directory holding the campus TSV files
//! - `SERVICE_PORT` - HTTP port (default: 4567)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Set to `false` to skip the Prometheus recorder

use std::path::PathBuf;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use campuspaths_lib::{resolve_data_dir, Error as LibError, Path, Point};
use campuspaths_service_shared::{
    from_lib_error, health_live, health_ready, metrics_handler, record_buildings_listed,
    record_path_calculated, record_path_failed, record_path_segments, AppState, PathQuery,
    ProblemDetails, RequestId, RequestTrackingLayer, ServiceResponse, Validate,
};

/// Service label attached to business metrics.
pub const SERVICE_NAME: &str = "campuspaths";

/// Port used when `SERVICE_PORT` is unset or unparsable.
pub const DEFAULT_PORT: u16 = 4567;

/// Startup configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_dir: PathBuf,
    pub port: u16,
}

impl ServiceConfig {
    pub fn from_env() -> campuspaths_lib::Result<Self> {
        Ok(Self {
            data_dir: resolve_data_dir(None)?,
            port: parse_port(std::env::var("SERVICE_PORT").ok().as_deref()),
        })
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Build the router with every endpoint and layer installed.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/path", get(path_handler))
        .route("/buildings", get(buildings_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(RequestTrackingLayer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Either the path or an RFC 9457 problem.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum PathResponse {
    Success(ServiceResponse<Path<Point>>),
    Error(ProblemDetails),
}

impl IntoResponse for PathResponse {
    fn into_response(self) -> Response {
        match self {
            PathResponse::Success(data) => data.into_response(),
            PathResponse::Error(problem) => problem.into_response(),
        }
    }
}

/// Handle `GET /path`.
async fn path_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<PathQuery>,
) -> PathResponse {
    info!(
        request_id = %request_id,
        origin = %query.origin,
        destination = %query.destination,
        "handling path request"
    );

    if let Err(problem) = query.validate(request_id.as_str()) {
        record_path_failed("validation_error", SERVICE_NAME);
        return PathResponse::Error(*problem);
    }

    let campus = state.campus();
    match campus.find_shortest_path(&query.origin, &query.destination) {
        Ok(Some(path)) => {
            record_path_calculated(SERVICE_NAME);
            record_path_segments(path.len());
            info!(
                request_id = %request_id,
                segments = path.len(),
                cost = path.cost(),
                "path computed successfully"
            );
            PathResponse::Success(ServiceResponse::new(path))
        }
        Ok(None) => {
            record_path_failed("no_path", SERVICE_NAME);
            info!(request_id = %request_id, "no path between buildings");
            PathResponse::Error(ProblemDetails::route_not_found(
                &query.origin,
                &query.destination,
                request_id.as_str(),
            ))
        }
        Err(e) => {
            let reason = match e {
                LibError::UnknownBuilding { .. } => "unknown_building",
                _ => "internal_error",
            };
            warn!(request_id = %request_id, error = %e, "path lookup failed");
            record_path_failed(reason, SERVICE_NAME);
            PathResponse::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Handle `GET /buildings`: a JSON object sorted by short name.
async fn buildings_handler(State(state): State<AppState>) -> Response {
    record_buildings_listed(SERVICE_NAME);
    Json(state.campus().building_names()).into_response()
}
