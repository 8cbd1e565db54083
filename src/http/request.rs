//! Request identification, path normalization and body decoding.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Echo the ID back on the response
//! - Match paths case-insensitively and ignore one trailing slash
//! - Decode `application/json` bodies before any handler runs
//!
//! # Design Decisions
//! - Request ID added as early as possible so every span carries it
//! - A client-supplied `x-request-id` is kept, not replaced
//! - Undecodable bodies are rejected by the extractor, so they never reach
//!   (or count in) a handler

use axum::{
    body::{Body, Bytes},
    extract::FromRequest,
    http::{header, HeaderMap, HeaderName, HeaderValue, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

use crate::http::response::ApiError;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdGenerator;

impl MakeRequestId for RequestIdGenerator {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

/// Layer assigning a request ID to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<RequestIdGenerator> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), RequestIdGenerator)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Middleware rewriting the path to its routing form before dispatch.
///
/// Handlers that need the path as sent use `OriginalUri`.
pub async fn normalize_path(mut request: Request<Body>, next: Next) -> Response {
    if let Some(uri) = routing_uri(request.uri()) {
        *request.uri_mut() = uri;
    }
    next.run(request).await
}

/// Lowercase the path and drop one trailing slash. `None` when unchanged.
fn routing_uri(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    let mut normalized = path.to_ascii_lowercase();
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    if normalized == path {
        return None;
    }

    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", normalized, query),
        None => normalized,
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}

/// A request body decoded as JSON.
///
/// Bodies not labelled `application/json` are not read and decode to `{}`,
/// as is an empty JSON body. A JSON body must start with `{` or `[`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

impl JsonBody {
    fn empty() -> Self {
        JsonBody(Value::Object(serde_json::Map::new()))
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(request.headers()) {
            return Ok(JsonBody::empty());
        }

        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(IntoResponse::into_response)?;

        decode_json(&bytes).map_err(|err| {
            tracing::debug!(error = %err, "Rejected request body");
            err.into_response()
        })
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn decode_json(bytes: &[u8]) -> Result<JsonBody, ApiError> {
    if bytes.is_empty() {
        return Ok(JsonBody::empty());
    }

    let first = bytes
        .iter()
        .copied()
        .find(|&b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
    if !matches!(first, Some(b'{') | Some(b'[')) {
        return Err(ApiError::InvalidJson(
            "JSON body must be an object or array".to_string(),
        ));
    }

    serde_json::from_slice(bytes)
        .map(JsonBody)
        .map_err(|e| ApiError::InvalidJson(e.to_string()))
}
