//! Error responses and shared response helpers.
//!
//! Every failure path produces a JSON body with an `error` field. 400 and
//! 500 add a `message`, 404 adds the requested `path`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// `name` missing or falsy in a `/greet` body.
    #[error("Name is required")]
    MissingName,
    /// `/greet` body was not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// Greeting construction failed after the presence check passed.
    #[error("Internal server error: {0}")]
    Internal(String),
    /// No handler matched the method and path.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingName | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::MissingName => ErrorBody {
                error: "Name is required",
                message: Some("Please provide a name in the request body".to_string()),
                path: None,
            },
            ApiError::InvalidJson(message) => ErrorBody {
                error: "Invalid JSON",
                message: Some(message.clone()),
                path: None,
            },
            ApiError::Internal(message) => ErrorBody {
                error: "Internal server error",
                message: Some(message.clone()),
                path: None,
            },
            ApiError::NotFound(path) => ErrorBody {
                error: "Not found",
                message: None,
                path: Some(path.clone()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Current UTC time as ISO-8601 with millisecond precision and a `Z` suffix.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
