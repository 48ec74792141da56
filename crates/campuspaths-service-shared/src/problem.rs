//! RFC 9457 Problem Details for HTTP APIs.
//!
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use campuspaths_lib::Error as LibError;

/// Problem type URI for unknown building short names.
pub const PROBLEM_UNKNOWN_BUILDING: &str = "/problems/unknown-building";

/// Problem type URI for building pairs with no walking route.
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for a service that has no usable campus data.
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use campuspaths_service_shared::{ProblemDetails, PROBLEM_UNKNOWN_BUILDING};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_UNKNOWN_BUILDING,
///     "Unknown Building",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("Building 'CSF' not found. Did you mean: CSE?")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request ID of the failing request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Always "application/problem+json".
    pub content_type: String,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for missing or malformed parameters.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 for a short name that names no building.
    pub fn unknown_building(
        name: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let detail = if suggestions.is_empty() {
            format!("Building '{}' not found", name)
        } else {
            format!(
                "Building '{}' not found. Did you mean: {}?",
                name,
                suggestions.join(", ")
            )
        };

        Self::new(
            PROBLEM_UNKNOWN_BUILDING,
            "Unknown Building",
            StatusCode::NOT_FOUND,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 for two known buildings with no walking route between them.
    pub fn route_not_found(origin: &str, destination: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_ROUTE_NOT_FOUND,
            "Route Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!(
            "No walking route exists from '{}' to '{}'",
            origin, destination
        ))
        .with_request_id(request_id)
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Map a library error onto the problem a client should see.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownBuilding { name, suggestions } => {
            ProblemDetails::unknown_building(name, suggestions, request_id)
        }
        LibError::DataNotFound { path } => ProblemDetails::service_unavailable(
            format!("Campus data not available at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}
