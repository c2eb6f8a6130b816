//! Chart of accounts error types.

use thiserror::Error;

/// Errors raised while loading or editing the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// Two accounts share the same code.
    #[error("Duplicate account code: {0}")]
    DuplicateCode(String),

    /// An account's parent is absent or missing from the chart.
    #[error("Account {code} references missing parent {parent:?}")]
    MissingParent {
        /// The child account.
        code: String,
        /// The parent code it declared, if any.
        parent: Option<String>,
    },

    /// Following parent links from an account revisits an account.
    #[error("Cycle detected in chart of accounts at {0}")]
    CycleDetected(String),

    /// The parent level is not exactly one above the child.
    #[error("Account {code} has level {level} but its parent sits at level {parent_level}")]
    LevelMismatch {
        /// The child account.
        code: String,
        /// The child's declared level.
        level: u8,
        /// The parent's level (0 when a level-1 account declares a parent).
        parent_level: u8,
    },

    /// An account sits deeper than the configured maximum level.
    #[error("Account {code} exceeds the maximum depth of {max_level}")]
    DepthExceeded {
        /// The offending account.
        code: String,
        /// The configured bound.
        max_level: u8,
    },

    /// No account with this code.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The account is referenced by journal lines.
    #[error("Account {0} is referenced by journal entries and cannot be removed")]
    AccountInUse(String),

    /// The account still has child accounts.
    #[error("Account {0} has child accounts and cannot be removed")]
    HasChildren(String),
}

impl ChartError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::MissingParent { .. } => "MISSING_PARENT",
            Self::CycleDetected(_) => "CYCLE_DETECTED",
            Self::LevelMismatch { .. } => "LEVEL_MISMATCH",
            Self::DepthExceeded { .. } => "DEPTH_EXCEEDED",
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInUse(_) => "ACCOUNT_IN_USE",
            Self::HasChildren(_) => "ACCOUNT_HAS_CHILDREN",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 422 Unprocessable - malformed hierarchy
            Self::MissingParent { .. }
            | Self::CycleDetected(_)
            | Self::LevelMismatch { .. }
            | Self::DepthExceeded { .. } => 422,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict - state of the chart or ledger forbids it
            Self::DuplicateCode(_) | Self::AccountInUse(_) | Self::HasChildren(_) => 409,
        }
    }
}
