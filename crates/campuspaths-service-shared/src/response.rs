//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Successful response body: the payload's fields plus a `content_type`
/// field, mirroring [`crate::ProblemDetails`].
///
/// # Example
///
/// ```
/// use campuspaths_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Walk {
///     cost: f64,
/// }
///
/// let response = ServiceResponse::new(Walk { cost: 140.0 });
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
