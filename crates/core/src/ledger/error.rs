//! Ledger error types.

use chrono::NaiveDate;
use partida_shared::types::EntryId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that reject a ledger mutation.
///
/// A rejected mutation leaves the ledger and its version untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Fewer than two lines, or no line with movement.
    #[error("Journal entry must have at least 2 lines with movement, got {count} lines")]
    EmptyLines {
        /// Number of lines received.
        count: usize,
    },

    /// Debits and credits differ by a cent or more.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}, Difference: {diff}")]
    UnbalancedEntry {
        /// Total debit.
        debit: Decimal,
        /// Total credit.
        credit: Decimal,
        /// Absolute difference.
        diff: Decimal,
    },

    /// A line carries a negative amount.
    #[error("Line for account {account_code} has a negative amount")]
    NegativeAmount {
        /// The line's account.
        account_code: String,
    },

    /// A line carries more than the largest accepted amount.
    #[error("Line for account {account_code} exceeds the maximum amount of {max}")]
    AmountTooLarge {
        /// The line's account.
        account_code: String,
        /// The cap.
        max: Decimal,
    },

    /// An entry's totals cannot be represented.
    #[error("Journal entry totals overflow")]
    TotalsOverflow,

    /// A line carries both a debit and a credit.
    #[error("Line for account {account_code} has both debit and credit")]
    BothSidesNonZero {
        /// The line's account.
        account_code: String,
    },

    // ========== Account Errors ==========
    /// The account code is not in the chart.
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// The account is disabled for posting.
    #[error("Account {0} is inactive")]
    InactiveAccount(String),

    /// The account groups other accounts and cannot take postings.
    #[error("Account {0} is a grouping account and does not accept postings")]
    NotPostable(String),

    // ========== Entry State Errors ==========
    /// No entry with this id.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(EntryId),

    /// The entry has already been voided.
    #[error("Journal entry {0} is already voided")]
    AlreadyVoided(EntryId),

    /// Reversing entries are final.
    #[error("Journal entry {0} is a reversal and cannot be voided")]
    CannotVoidReversal(EntryId),

    /// The reversal would be dated before the entry it reverses.
    #[error("Reversal of entry {id} dated {reversal_date} precedes the original date {original_date}")]
    ReversalBeforeOriginal {
        /// The entry being voided.
        id: EntryId,
        /// Its date.
        original_date: NaiveDate,
        /// The requested reversal date.
        reversal_date: NaiveDate,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLines { .. } => "EMPTY_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            Self::TotalsOverflow => "TOTALS_OVERFLOW",
            Self::BothSidesNonZero { .. } => "BOTH_SIDES_NON_ZERO",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::InactiveAccount(_) => "INACTIVE_ACCOUNT",
            Self::NotPostable(_) => "NOT_POSTABLE",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::AlreadyVoided(_) => "ALREADY_VOIDED",
            Self::CannotVoidReversal(_) => "CANNOT_VOID_REVERSAL",
            Self::ReversalBeforeOriginal { .. } => "REVERSAL_BEFORE_ORIGINAL",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 422 Unprocessable - the entry itself is invalid
            Self::EmptyLines { .. }
            | Self::UnbalancedEntry { .. }
            | Self::NegativeAmount { .. }
            | Self::AmountTooLarge { .. }
            | Self::TotalsOverflow
            | Self::BothSidesNonZero { .. }
            | Self::UnknownAccount(_)
            | Self::InactiveAccount(_)
            | Self::NotPostable(_)
            | Self::ReversalBeforeOriginal { .. } => 422,

            // 404 Not Found
            Self::EntryNotFound(_) => 404,

            // 409 Conflict - the entry's state forbids it
            Self::AlreadyVoided(_) | Self::CannotVoidReversal(_) => 409,
        }
    }
}
