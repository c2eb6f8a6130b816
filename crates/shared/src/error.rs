//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Work did not finish within its time box.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error raised by a domain module, carrying its own code and status.
    #[error("{message}")]
    Domain {
        /// HTTP status code chosen by the domain error.
        status: u16,
        /// Machine-readable error code.
        code: &'static str,
        /// Human-readable message.
        message: String,
        /// Optional structured payload (e.g. unbalanced totals).
        details: Option<serde_json::Value>,
    },
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Timeout(_) => 503,
            Self::Internal(_) => 500,
            Self::Domain { status, .. } => *status,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain { code, .. } => code,
        }
    }

    /// Returns the structured details attached to the error, if any.
    #[must_use]
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Domain { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}
