//! Shared infrastructure for the campus paths HTTP service.
//!
//! This crate provides the HTTP glue around `campuspaths-lib`:
//!
//! - [`AppState`]: the campus map, loaded once and shared by every handler
//! - [`health_live`] / [`health_ready`]: liveness and readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for error responses
//! - [`ServiceResponse`]: wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: JSON or text logging setup
//! - [`middleware`]: request IDs and HTTP metrics
//! - [`PathQuery`]: query parameters for the path endpoint, with validation
//!
//! Handlers stay thin: parse the query, validate it, call the library, and
//! map the outcome to a response.
//!
//! # Testing Support
//!
//! The [`test_utils`] module loads the fixture campus for handler tests.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_buildings_listed, record_path_calculated,
    record_path_failed, record_path_segments, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, RequestId, RequestTrackingLayer};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_ROUTE_NOT_FOUND, PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_UNKNOWN_BUILDING,
};
pub use request::{PathQuery, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
