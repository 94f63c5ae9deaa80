//! Errors surfaced to HTTP callers.
//!
//! Transport errors on live channels never reach this type; they terminate
//! the one ingest loop that saw them.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("driver not found: {0}")]
    DriverNotFound(String),
    #[error("no track recorded under key: {0}")]
    TrackNotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::DriverNotFound(_) | ApiError::TrackNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
