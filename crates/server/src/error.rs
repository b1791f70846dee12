//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`,
//! and every failure is answered with the same `{"error": "..."}` JSON body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use guestbook_core::api::ErrorResponse;

use crate::services::GuestbookError;

/// Which guestbook operation failed, for choosing a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Delete,
}

/// Application-level error type for the guestbook server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Guestbook operation failed.
    #[error("Guestbook {op:?} failed: {source}")]
    Guestbook {
        op: Operation,
        #[source]
        source: GuestbookError,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Attach the failing operation to a service error.
    #[must_use]
    pub const fn guestbook(op: Operation, source: GuestbookError) -> Self {
        Self::Guestbook { op, source }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Guestbook { source, .. } => match source {
                GuestbookError::Validation(_) => StatusCode::BAD_REQUEST,
                GuestbookError::Unauthorized => StatusCode::UNAUTHORIZED,
                GuestbookError::NotFound(_) => StatusCode::NOT_FOUND,
                GuestbookError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show to guests. Never includes internal details.
    fn public_message(&self) -> String {
        match self {
            Self::Guestbook { op, source } => match source {
                GuestbookError::Validation(_) => "Name and message are required.".to_string(),
                GuestbookError::Unauthorized => "The password does not match.".to_string(),
                GuestbookError::NotFound(_) => "This message no longer exists.".to_string(),
                GuestbookError::Store(_) => match op {
                    Operation::List => "Failed to load guestbook messages.".to_string(),
                    Operation::Create => "Failed to save your message.".to_string(),
                    Operation::Delete => "Failed to delete the message.".to_string(),
                },
            },
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
