//! Tax calculation error types.

use thiserror::Error;

/// Errors raised by the penalty calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    /// An amount or constant is out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl TaxError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
        }
    }
}
