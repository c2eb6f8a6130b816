//! Balance calculation errors.

use thiserror::Error;

use crate::chart::ChartError;

/// Errors from balance aggregation and rollups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// The cancellation token fired before aggregation finished.
    #[error("Balance calculation was cancelled")]
    Cancelled,

    /// An account's debit or credit sum left the `Decimal` range.
    #[error("Balance of account {0} overflowed")]
    Overflow(String),

    /// Chart lookup failed.
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl BalanceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => "CANCELLED",
            Self::Overflow(_) => "BALANCE_OVERFLOW",
            Self::Chart(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Cancelled => 503,
            Self::Overflow(_) => 422,
            Self::Chart(e) => e.http_status_code(),
        }
    }
}
