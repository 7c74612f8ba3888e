//! HTTP error types.
//!
//! Maps provider errors into HTTP responses. Every error produces a JSON
//! body with a machine-readable `error` code and a human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use famox_core::api::ErrorBody;
use famox_core::error::ProviderError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// No admin session.
    Unauthorized(String),
    /// Requested record not found.
    NotFound(String),
    /// Client sent invalid input.
    BadRequest(String),
    /// The provider has been closed (server shutting down).
    Unavailable(String),
    /// The remote backend behind this server failed.
    BadGateway(String),
    /// Internal server error.
    Internal(String),
}

impl AppError {
    pub(crate) fn not_found(what: &str, key: &str) -> Self {
        Self::NotFound(format!("{what} '{key}' not found"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable", msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "request failed");
        }

        let body = ErrorBody {
            error: error.to_owned(),
            message,
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Invalid { .. } => Self::BadRequest(err.to_string()),
            ProviderError::Closed => Self::Unavailable(err.to_string()),
            ProviderError::Storage(_) | ProviderError::Serialize { .. } => {
                Self::Internal(err.to_string())
            }
            // Remote status errors and transport failures.
            _ => Self::BadGateway(err.to_string()),
        }
    }
}
