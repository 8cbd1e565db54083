//! Route handlers.
//!
//! Handlers translate requests into greeting calls and read the shared
//! counters. `/`, `/greet` and the 404 fallback count requests; the health,
//! readiness and metrics endpoints do not.

use axum::{
    extract::{OriginalUri, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::greeting::{Greeting, Style};
use crate::http::request::JsonBody;
use crate::http::response::{iso_timestamp, ApiError};
use crate::http::server::AppState;

const SERVICE_MESSAGE: &str = "Hello World CI/CD API";
const METRICS_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
/// Reported when `name` is truthy but not a string; the wording clients of
/// the service already see for this case.
const NON_STRING_NAME: &str = "name.trim is not a function";

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub ready: &'static str,
    pub metrics: &'static str,
    pub greet: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub uptime: u64,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ReadyStatus {
    pub status: &'static str,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct GreetResponse {
    pub greeting: String,
    pub timestamp: String,
}

pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    state.metrics.record_request();
    Json(ServiceInfo {
        message: SERVICE_MESSAGE,
        version: state.version.to_string(),
        endpoints: Endpoints {
            health: "/health",
            ready: "/ready",
            metrics: "/metrics",
            greet: "POST /greet",
        },
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        uptime: state.metrics.uptime_secs(),
        timestamp: iso_timestamp(),
    })
}

pub async fn ready(State(state): State<AppState>) -> Json<ReadyStatus> {
    Json(ReadyStatus {
        status: "ready",
        version: state.version.to_string(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
        state.metrics.render_prometheus(),
    )
}

pub async fn greet(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<Json<GreetResponse>, ApiError> {
    state.metrics.record_request();

    match build_greeting(&payload) {
        Ok(greeting) => Ok(Json(GreetResponse {
            greeting,
            timestamp: iso_timestamp(),
        })),
        Err(err) => {
            state.metrics.record_error();
            tracing::warn!(error = %err, status = err.status().as_u16(), "Greeting request failed");
            Err(err)
        }
    }
}

/// Reports the path as sent, before case and trailing-slash normalization.
pub async fn not_found(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> ApiError {
    state.metrics.record_request();
    state.metrics.record_error();
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::NotFound(uri.path().to_string())
}

/// Render the greeting requested by a decoded `/greet` body.
///
/// A missing or falsy `name` is a client error (400). A present name that
/// cannot become a `Greeting` (whitespace only, or not a string) is reported
/// as an internal error (500).
fn build_greeting(payload: &Value) -> Result<String, ApiError> {
    let name = payload
        .get("name")
        .filter(|v| is_truthy(v))
        .ok_or(ApiError::MissingName)?;
    let name = name
        .as_str()
        .ok_or_else(|| ApiError::Internal(NON_STRING_NAME.to_string()))?;
    let style = Style::from_optional(payload.get("style").and_then(Value::as_str));

    let greeting = Greeting::new(name).map_err(|e| ApiError::Internal(e.to_string()))?;
    tracing::debug!(style = %style, "Rendering greeting");
    Ok(greeting.render(style))
}

/// JavaScript truthiness of a decoded JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
