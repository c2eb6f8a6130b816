//! Cross-check findings.

use partida_shared::types::EntryId;
use rust_decimal::Decimal;
use serde::Serialize;

/// What kind of cross-check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Total debits and credits over all entries differ.
    UnbalancedLedger,
    /// A single stored entry does not balance.
    UnbalancedEntry,
    /// Assets differ from liabilities plus equity.
    UnbalancedBalanceSheet,
    /// Trial balance columns do not agree.
    UnbalancedTrialBalance,
}

/// A failed cross-check over data that was already accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    /// Which check failed.
    pub kind: DiscrepancyKind,
    /// The value the check expected (the debit side or the assets).
    pub expected: Decimal,
    /// The value found (the credit side or liabilities plus equity).
    pub actual: Decimal,
    /// Entries involved, when the finding can be traced to entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affected_entry_ids: Vec<EntryId>,
}

impl Discrepancy {
    /// Creates a discrepancy not tied to specific entries.
    #[must_use]
    pub fn new(kind: DiscrepancyKind, expected: Decimal, actual: Decimal) -> Self {
        Self {
            kind,
            expected,
            actual,
            affected_entry_ids: Vec::new(),
        }
    }

    /// Attaches the entries involved.
    #[must_use]
    pub fn with_entries(mut self, ids: Vec<EntryId>) -> Self {
        self.affected_entry_ids = ids;
        self
    }

    /// Absolute gap between expected and actual.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        (self.expected - self.actual).abs()
    }
}
