//! Ledger input and result types.

use chrono::NaiveDate;
use partida_shared::types::{EntryId, LedgerVersion, checked_total, within_tolerance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::{JournalEntry, JournalLine};
use crate::validation::Discrepancy;

/// Input for posting a journal entry.
///
/// Lines are already well-formed (see [`JournalLine`]); the ledger checks
/// accounts and the balance before accepting the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryInput {
    /// Accounting date.
    pub date: NaiveDate,
    /// Description (*glosa*).
    pub concept: String,
    /// External reference.
    #[serde(default)]
    pub reference: String,
    /// Debit and credit lines.
    pub lines: Vec<JournalLine>,
}

/// Request to void a posted entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoidRequest {
    /// Date of the reversing entry; must not precede the original.
    pub date: NaiveDate,
    /// Reason recorded in the reversal's concept.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Debit and credit sums of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryTotals {
    /// Total debit.
    pub debit: Decimal,
    /// Total credit.
    pub credit: Decimal,
    /// Whether the totals agree within one cent.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: within_tolerance(debit, credit),
        }
    }

    /// Sums a slice of lines, saturating at the `Decimal` range.
    ///
    /// Line amounts are capped, so stored entries never reach saturation.
    #[must_use]
    pub fn from_lines(lines: &[JournalLine]) -> Self {
        let (debit, credit) = lines
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(d, c), line| {
                (
                    d.saturating_add(line.debit_amount()),
                    c.saturating_add(line.credit_amount()),
                )
            });
        Self::new(debit, credit)
    }

    /// Sums a slice of lines, returning `None` if a total overflows.
    #[must_use]
    pub fn checked_from_lines(lines: &[JournalLine]) -> Option<Self> {
        let debit = checked_total(lines.iter().map(JournalLine::debit_amount))?;
        let credit = checked_total(lines.iter().map(JournalLine::credit_amount))?;
        Some(Self::new(debit, credit))
    }

    /// Returns the absolute difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        (self.debit - self.credit).abs()
    }
}

/// Result of a successful posting or void.
#[derive(Debug, Clone, Serialize)]
pub struct PostingResult {
    /// The entry that was appended.
    pub entry: JournalEntry,
    /// Ledger version after the append.
    pub version: LedgerVersion,
}

/// Result of a raw import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportResult {
    /// Ids assigned to the imported entries, in input order.
    pub ids: Vec<EntryId>,
    /// Ledger version after the import.
    pub version: LedgerVersion,
    /// Cross-check findings over the whole ledger after the import.
    pub discrepancies: Vec<Discrepancy>,
}
