//! Request tracking for the campus paths service.
//!
//! [`RequestTrackingLayer`] gives every request a [`RequestId`] (taken from
//! `X-Request-ID` or freshly generated as a UUID v7), stores it in the request
//! extensions, echoes it back on the response, and records:
//!
//! - `http_requests_total`: counter by method, route and status bucket
//! - `http_request_duration_seconds`: histogram by method and route

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Instant;

use axum::extract::FromRequestParts;
use http::header::HeaderName;
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Header carrying the request correlation ID in both directions.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Routes reported as metric labels; anything else becomes "unmatched".
const KNOWN_ROUTES: [&str; 5] = [
    "/path",
    "/buildings",
    "/health/live",
    "/health/ready",
    "/metrics",
];

/// Request correlation ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh time-ordered UUID v7.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Use a non-empty `X-Request-ID` header, or generate a UUID v7.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Handlers extract the ID stored by [`RequestTrackingLayer`], falling back
/// to the header when the layer is not installed.
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<RequestId>() {
            return Ok(id.clone());
        }
        Ok(extract_or_generate_request_id(&parts.headers))
    }
}

fn route_label(path: &str) -> &'static str {
    KNOWN_ROUTES
        .iter()
        .copied()
        .find(|route| *route == path)
        .unwrap_or("unmatched")
}

fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Tower layer installing [`RequestTracking`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestTrackingLayer;

impl<S> Layer<S> for RequestTrackingLayer {
    type Service = RequestTracking<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestTracking { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestTracking<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestTracking<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = TrackedResponse<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let started = Instant::now();
        let request_id = extract_or_generate_request_id(req.headers());
        req.extensions_mut().insert(request_id.clone());

        let method = req.method().to_string();
        let route = route_label(req.uri().path());
        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %req.uri().path(),
        );

        let inner = span.in_scope(|| {
            tracing::debug!("handling request");
            self.inner.call(req)
        });

        TrackedResponse {
            inner,
            started,
            method,
            route,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Response future that stamps the request ID and records metrics.
    pub struct TrackedResponse<F> {
        #[pin]
        inner: F,
        started: Instant,
        method: String,
        route: &'static str,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for TrackedResponse<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _entered = this.span.enter();

        let mut result = ready!(this.inner.poll(cx));
        let elapsed = this.started.elapsed().as_secs_f64();

        let status = match &mut result {
            Ok(response) => {
                if let Ok(value) = HeaderValue::from_str(this.request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                response.status().as_u16()
            }
            Err(_) => 500,
        };

        metrics::counter!(
            "http_requests_total",
            "method" => this.method.clone(),
            "path" => *this.route,
            "status" => status_bucket(status)
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => this.method.clone(),
            "path" => *this.route
        )
        .record(elapsed);

        tracing::info!(status, latency_ms = elapsed * 1000.0, "request completed");
        Poll::Ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    #[test]
    fn test_request_id_generate() {
        let id1 = RequestId::generate();
        let id2 = RequestId::generate();

        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 36);
    }

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Request-ID", HeaderValue::from_static("test-123"));

        assert_eq!(extract_or_generate_request_id(&headers).as_str(), "test-123");
    }

    #[test]
    fn test_empty_header_generates_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static(""));

        assert_eq!(extract_or_generate_request_id(&headers).as_str().len(), 36);
    }

    #[test]
    fn test_route_label() {
        assert_eq!(route_label("/path"), "/path");
        assert_eq!(route_label("/health/ready"), "/health/ready");
        assert_eq!(route_label("/path/extra"), "unmatched");
        assert_eq!(route_label("/"), "unmatched");
    }

    #[test]
    fn test_status_bucket() {
        assert_eq!(status_bucket(200), "2xx");
        assert_eq!(status_bucket(304), "3xx");
        assert_eq!(status_bucket(404), "4xx");
        assert_eq!(status_bucket(503), "5xx");
        assert_eq!(status_bucket(99), "other");
    }

    #[tokio::test]
    async fn test_layer_stores_and_echoes_request_id() {
        let service = RequestTrackingLayer.layer(tower::service_fn(
            |req: Request<()>| async move {
                let seen = req
                    .extensions()
                    .get::<RequestId>()
                    .map(|id| id.to_string())
                    .unwrap_or_default();
                Ok::<_, Infallible>(Response::new(seen))
            },
        ));

        let request = Request::builder()
            .uri("/buildings")
            .header("x-request-id", "abc-1")
            .body(())
            .unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert_eq!(response.body(), "abc-1");
        assert_eq!(response.headers()[&REQUEST_ID_HEADER], "abc-1");
    }
}
