//! API error types and the HTTP error body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use storefront_core::error::ServiceError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct HttpErrorInfo {
    /// When the error response was produced.
    pub timestamp: DateTime<Utc>,
    /// The request path that failed.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
    /// The HTTP status code, repeated in the body.
    pub status: u16,
}

/// HTTP-layer wrapper around `ServiceError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError {
    error: ServiceError,
    path: String,
}

impl ApiError {
    /// Wraps a service error together with the request path it occurred on.
    #[must_use]
    pub fn new(error: ServiceError, path: &str) -> Self {
        Self {
            error,
            path: path.to_owned(),
        }
    }
}

const fn status_for(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::ConcurrencyConflict { .. } => StatusCode::CONFLICT,
        ServiceError::Overloaded(_) => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::EventProcessing(_) | ServiceError::Publish(_) | ServiceError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.error);
        let body = HttpErrorInfo {
            timestamp: Utc::now(),
            path: self.path,
            message: self.error.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
