//! Application error taxonomy and its HTTP mapping.
//!
//! Every public operation of [`crate::application::services::ResolutionService`]
//! returns [`AppError`]. Store faults are converted into [`AppError::Internal`]
//! at the boundary where they occur and logged there; the client only ever
//! sees a generic message for them.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt::Display;

use crate::api::dto::error::ErrorResponse;

/// Message returned to clients for any internal fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred";

/// Errors surfaced by the shortener services.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required request field is missing or empty.
    #[error("{0}")]
    InvalidRequest(String),

    /// Global or per-user in-flight threshold exceeded.
    #[error("Too many concurrent requests. Please try again later.")]
    RateLimited,

    /// No record carries the requested short code.
    #[error("Full URL not found")]
    NotFound,

    /// A record exists for the code but is past its link TTL.
    #[error("This link has expired")]
    Expired,

    /// Store failure or unexpected fault. The detail is never sent to clients.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Builds an [`AppError::Internal`] and records the cause in the error log.
    pub fn internal(cause: impl Display) -> Self {
        let detail = cause.to_string();
        tracing::error!(error = %detail, "internal error");
        Self::Internal(detail)
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Expired => StatusCode::GONE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to expose to the client.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::internal(format_args!("database error: {e}"))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        Self::internal(format_args!("counter store error: {e}"))
    }
}
