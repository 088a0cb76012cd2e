//! Response envelopes shared by every endpoint.

use crate::error::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Error code sent in the body of every 404 response.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// Error code sent in the body of every 500 response.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Debug, Serialize)]
struct ErrorMetadata {
    view: &'static str,
}

/// `{"id": <code>, "metadata": {"view": ""}}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    id: &'static str,
    metadata: ErrorMetadata,
}
impl ErrorBody {
    fn new(id: &'static str) -> Self {
        Self { id, metadata: ErrorMetadata { view: "" } }
    }
}

/// Outcome of an endpoint, before it becomes an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// `200 OK` with the payload as JSON.
    Found(T),
    /// `404 Not Found` with the structured `NOT_FOUND` body.
    NotFound,
}
impl<T> Reply<T> {
    pub fn into_found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}
impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Found(value) => (StatusCode::OK, Json(value)).into_response(),
            Self::NotFound => (StatusCode::NOT_FOUND, Json(ErrorBody::new(NOT_FOUND))).into_response(),
        }
    }
}

/// A failure that escaped an endpoint; always a `500`.
#[derive(Debug)]
pub struct ApiError(Error);
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, retryable = self.0.is_retryable(), "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(INTERNAL_ERROR))).into_response()
    }
}
