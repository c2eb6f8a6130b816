//! Journal entry domain types.

use chrono::NaiveDate;
use partida_shared::types::{EntryId, MAX_AMOUNT, round_currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::types::EntryTotals;

/// A single debit or credit line of a journal entry.
///
/// Amounts are rounded to cents on construction. A line carries either a
/// debit or a credit; a line with both sides zero is a placeholder that is
/// kept but contributes nothing to totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawJournalLine")]
pub struct JournalLine {
    account_code: String,
    debit: Decimal,
    credit: Decimal,
}

/// Wire shape of a journal line before validation.
#[derive(Deserialize)]
struct RawJournalLine {
    #[serde(alias = "accountCode")]
    account_code: String,
    #[serde(default)]
    debit: Decimal,
    #[serde(default)]
    credit: Decimal,
}

impl TryFrom<RawJournalLine> for JournalLine {
    type Error = LedgerError;

    fn try_from(raw: RawJournalLine) -> Result<Self, Self::Error> {
        Self::new(raw.account_code, raw.debit, raw.credit)
    }
}

impl JournalLine {
    /// Builds a line from both columns.
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` if either column is negative
    /// - `AmountTooLarge` if either column exceeds [`MAX_AMOUNT`]
    /// - `BothSidesNonZero` if both columns carry an amount
    pub fn new(
        account_code: impl Into<String>,
        debit: Decimal,
        credit: Decimal,
    ) -> Result<Self, LedgerError> {
        let account_code = account_code.into();
        let debit = round_currency(debit);
        let credit = round_currency(credit);

        if debit < Decimal::ZERO || credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { account_code });
        }
        if debit > MAX_AMOUNT || credit > MAX_AMOUNT {
            return Err(LedgerError::AmountTooLarge {
                account_code,
                max: MAX_AMOUNT,
            });
        }
        if !debit.is_zero() && !credit.is_zero() {
            return Err(LedgerError::BothSidesNonZero { account_code });
        }

        Ok(Self {
            account_code,
            debit,
            credit,
        })
    }

    /// Builds a debit line.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `amount` is negative.
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Result<Self, LedgerError> {
        Self::new(account_code, amount, Decimal::ZERO)
    }

    /// Builds a credit line.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `amount` is negative.
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Result<Self, LedgerError> {
        Self::new(account_code, Decimal::ZERO, amount)
    }

    /// The account this line posts to.
    #[must_use]
    pub fn account_code(&self) -> &str {
        &self.account_code
    }

    /// Debit amount (*debe*).
    #[must_use]
    pub fn debit_amount(&self) -> Decimal {
        self.debit
    }

    /// Credit amount (*haber*).
    #[must_use]
    pub fn credit_amount(&self) -> Decimal {
        self.credit
    }

    /// Returns true for a structural line with no movement.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }

    /// Returns the same line with debit and credit swapped.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            account_code: self.account_code.clone(),
            debit: self.credit,
            credit: self.debit,
        }
    }
}

/// Lifecycle status of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Accepted into the ledger.
    Posted,
    /// Cancelled by a later reversing entry.
    Voided,
}

/// How an entry entered the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrigin {
    /// Posted or voided through the validated journal path.
    Journal,
    /// Bulk-loaded legacy data that skipped the balance check.
    Imported,
}

/// A journal entry (*asiento contable*) as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Sequential identifier assigned on acceptance.
    pub id: EntryId,
    /// Accounting date.
    pub date: NaiveDate,
    /// Description (*glosa*).
    pub concept: String,
    /// External reference such as an invoice number.
    pub reference: String,
    /// Current status.
    pub status: EntryStatus,
    /// Entry path.
    pub origin: EntryOrigin,
    /// Debit and credit lines.
    pub lines: Vec<JournalLine>,
    /// The entry this one reverses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverses: Option<EntryId>,
    /// The entry that reversed this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversed_by: Option<EntryId>,
}

impl JournalEntry {
    /// Sums the debit and credit columns.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        EntryTotals::from_lines(&self.lines)
    }

    /// Returns true if any line posts to `code`.
    #[must_use]
    pub fn references(&self, code: &str) -> bool {
        self.lines.iter().any(|line| line.account_code == code)
    }

    /// Returns true if this entry reverses another.
    #[must_use]
    pub fn is_reversal(&self) -> bool {
        self.reverses.is_some()
    }

    /// Returns true if this entry has been voided.
    #[must_use]
    pub fn is_voided(&self) -> bool {
        self.status == EntryStatus::Voided
    }
}
