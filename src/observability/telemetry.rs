//! Per-request telemetry: spans and facade metrics.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::Span;

use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;

/// Route label for requests that reached the 404 fallback.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Build the span wrapping one request.
pub fn make_request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// Middleware recording latency and status for every request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let response = next.run(request).await;
    let status = response.status().as_u16();

    metrics::record_response(&method, &route, status, start);
    tracing::debug!(
        method = %method,
        route = %route,
        status,
        elapsed_us = start.elapsed().as_micros() as u64,
        "Request completed"
    );

    response
}
