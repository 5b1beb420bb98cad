//! Visits Error Types

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use platform::badge::BadgeError;
use thiserror::Error;

/// Visits-specific result type alias
pub type VisitsResult<T> = Result<T, VisitsError>;

/// Visits-specific error variants
///
/// Client errors carry a fixed plain-text body; server errors answer with an
/// empty body.
#[derive(Debug, Error)]
pub enum VisitsError {
    /// Subject failed validation
    #[error("Invalid username")]
    InvalidSubject,

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimitExceeded { retry_after_secs: u64 },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Badge could not be encoded
    #[error(transparent)]
    Badge(#[from] BadgeError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VisitsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            VisitsError::InvalidSubject => StatusCode::BAD_REQUEST,
            VisitsError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            VisitsError::Database(_) | VisitsError::Badge(_) | VisitsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            VisitsError::Database(e) => {
                tracing::error!(error = %e, "Visits database error");
            }
            VisitsError::Badge(e) => {
                tracing::error!(error = %e, "Badge rendering error");
            }
            VisitsError::Internal(msg) => {
                tracing::error!(message = %msg, "Visits internal error");
            }
            VisitsError::RateLimitExceeded { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Badge rate limit exceeded");
            }
            VisitsError::InvalidSubject => {
                tracing::debug!(error = %self, "Rejected badge request");
            }
        }
    }
}

impl IntoResponse for VisitsError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();

        match &self {
            VisitsError::InvalidSubject => (status, self.to_string()).into_response(),
            VisitsError::RateLimitExceeded { retry_after_secs } => {
                let mut response = (status, self.to_string()).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(*retry_after_secs));
                response
            }
            _ => (status, ()).into_response(),
        }
    }
}
