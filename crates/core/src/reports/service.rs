//! Report generation over a ledger snapshot.

use chrono::NaiveDate;
use partida_shared::types::within_tolerance;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use super::error::ReportError;
use super::statements::{balance_sheet, income_statement, trial_balance};
use super::types::{
    BalanceSheet, IncomeStatement, LedgerCheck, Report, ReportKey, ReportWithWarnings,
    TrialBalance, TrialBalanceFormat,
};
use crate::balance::{compute_account_balances_cancellable, compute_range_balances_cancellable};
use crate::chart::ChartOfAccounts;
use crate::ledger::Ledger;
use crate::validation::{validate_balance_sheet, validate_ledger, validate_trial_balance};

/// Service for generating financial reports.
///
/// Each entry point computes balances from the given snapshot, builds the
/// report and attaches the ledger and report cross-checks as warnings.
/// Reports are produced even when the cross-checks fail.
pub struct ReportService;

impl ReportService {
    /// Generates the report identified by `key`.
    ///
    /// # Errors
    ///
    /// See the individual report methods.
    pub fn generate(
        chart: &ChartOfAccounts,
        ledger: &Ledger,
        key: &ReportKey,
        cancel: &CancellationToken,
    ) -> Result<Report, ReportError> {
        Ok(match *key {
            ReportKey::TrialBalance { from, to, format } => {
                Report::TrialBalance(Self::trial_balance(chart, ledger, from, to, format, cancel)?)
            }
            ReportKey::BalanceSheet { as_of } => {
                Report::BalanceSheet(Self::balance_sheet(chart, ledger, as_of, cancel)?)
            }
            ReportKey::IncomeStatement { from, to } => {
                Report::IncomeStatement(Self::income_statement(chart, ledger, from, to, cancel)?)
            }
            ReportKey::LedgerCheck => Report::LedgerCheck(Self::ledger_check(ledger)),
        })
    }

    /// Trial balance over entries dated within `from..=to`.
    ///
    /// # Errors
    ///
    /// - `InvalidDateRange` if both ends are given and `from > to`
    /// - `Cancelled` if `cancel` fires
    pub fn trial_balance(
        chart: &ChartOfAccounts,
        ledger: &Ledger,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        format: TrialBalanceFormat,
        cancel: &CancellationToken,
    ) -> Result<ReportWithWarnings<TrialBalance>, ReportError> {
        if let (Some(start), Some(end)) = (from, to)
            && start > end
        {
            return Err(ReportError::InvalidDateRange { start, end });
        }

        let balances = compute_range_balances_cancellable(chart, ledger, from, to, cancel)?;
        let report = trial_balance(chart, &balances, format);

        let mut warnings = validate_ledger(ledger);
        warnings.extend(validate_trial_balance(&report));
        Ok(ReportWithWarnings {
            report,
            warnings,
            ledger_version: ledger.version(),
        })
    }

    /// Balance sheet as of `as_of`.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if `cancel` fires.
    pub fn balance_sheet(
        chart: &ChartOfAccounts,
        ledger: &Ledger,
        as_of: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<ReportWithWarnings<BalanceSheet>, ReportError> {
        let balances = compute_account_balances_cancellable(chart, ledger, Some(as_of), cancel)?;
        let report = balance_sheet(chart, &balances, as_of);

        let mut warnings = validate_ledger(ledger);
        warnings.extend(validate_balance_sheet(&report));
        Ok(ReportWithWarnings {
            report,
            warnings,
            ledger_version: ledger.version(),
        })
    }

    /// Income statement over entries dated within `from..=to`.
    ///
    /// # Errors
    ///
    /// - `InvalidDateRange` if `from > to`
    /// - `Cancelled` if `cancel` fires
    pub fn income_statement(
        chart: &ChartOfAccounts,
        ledger: &Ledger,
        from: NaiveDate,
        to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<ReportWithWarnings<IncomeStatement>, ReportError> {
        if from > to {
            return Err(ReportError::InvalidDateRange { start: from, end: to });
        }

        let balances = compute_range_balances_cancellable(chart, ledger, Some(from), Some(to), cancel)?;
        let report = income_statement(chart, &balances, from, to)?;

        Ok(ReportWithWarnings {
            report,
            warnings: validate_ledger(ledger),
            ledger_version: ledger.version(),
        })
    }

    /// Ledger-wide totals and discrepancies.
    #[must_use]
    pub fn ledger_check(ledger: &Ledger) -> ReportWithWarnings<LedgerCheck> {
        let (total_debit, total_credit) = ledger.entries().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(debit, credit), entry| {
                let totals = entry.totals();
                (debit.saturating_add(totals.debit), credit.saturating_add(totals.credit))
            },
        );

        ReportWithWarnings {
            report: LedgerCheck {
                entries: ledger.len(),
                total_debit,
                total_credit,
                cuadrado: within_tolerance(total_debit, total_credit),
            },
            warnings: validate_ledger(ledger),
            ledger_version: ledger.version(),
        }
    }
}
