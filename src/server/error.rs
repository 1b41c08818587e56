//! HTTP error type for the API handlers.
//!
//! Errors render as `{"error": "<message>"}`. Internal errors log their full
//! source chain and expose only the opaque message to the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

/// API error with the status it maps to.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid client input (400).
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Request body over the configured limit (413).
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Storage or other server-side failure (500).
    #[error("{message}")]
    Internal {
        message: String,
        cause: anyhow::Error,
    },
}

impl AppError {
    /// Internal error with an opaque public message and a logged cause.
    pub fn internal(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message: message.into(),
            cause: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, cause } = &self {
            error!(error = %format!("{cause:#}"), "{message}");
        }

        let status = self.status();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
