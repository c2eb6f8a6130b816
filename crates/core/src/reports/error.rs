//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::balance::BalanceError;
use crate::chart::ChartError;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Generation was cancelled or timed out.
    #[error("Report generation was cancelled")]
    Cancelled,

    /// A total left the `Decimal` range.
    #[error("Report totals overflowed: {0}")]
    Overflow(String),

    /// Chart lookup failed.
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl From<BalanceError> for ReportError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::Cancelled => Self::Cancelled,
            BalanceError::Overflow(code) => Self::Overflow(format!("account {code}")),
            BalanceError::Chart(e) => Self::Chart(e),
        }
    }
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::Cancelled => "REPORT_CANCELLED",
            Self::Overflow(_) => "REPORT_OVERFLOW",
            Self::Chart(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidDateRange { .. } => 400,
            Self::Cancelled => 503,
            Self::Overflow(_) => 422,
            Self::Chart(e) => e.http_status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_error_conversion() {
        assert_eq!(ReportError::from(BalanceError::Cancelled), ReportError::Cancelled);
        assert_eq!(ReportError::Cancelled.http_status_code(), 503);
        let err = ReportError::from(BalanceError::Chart(ChartError::NotFound("9".into())));
        assert_eq!(err.error_code(), "ACCOUNT_NOT_FOUND");
        assert_eq!(err.http_status_code(), 404);

        let err = ReportError::from(BalanceError::Overflow("1111".into()));
        assert_eq!(err, ReportError::Overflow("account 1111".into()));
        assert_eq!(err.error_code(), "REPORT_OVERFLOW");
    }

    #[test]
    fn test_invalid_range_display() {
        let err = ReportError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(
            err.to_string(),
            "Invalid date range: start 2026-02-01 is after end 2026-01-01"
        );
    }
}
