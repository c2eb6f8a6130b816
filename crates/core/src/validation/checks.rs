//! Entry, ledger and statement checks.

use partida_shared::types::within_tolerance;
use rust_decimal::Decimal;

use super::discrepancy::{Discrepancy, DiscrepancyKind};
use crate::ledger::{EntryTotals, JournalLine, Ledger, LedgerError};
use crate::reports::{BalanceSheet, TrialBalance};

/// Checks that a set of lines balances within one cent.
///
/// Placeholder lines contribute zero and do not affect the result.
///
/// # Errors
///
/// - `TotalsOverflow` if a column cannot be summed
/// - `UnbalancedEntry` with both totals and their absolute difference
pub fn validate_entry(lines: &[JournalLine]) -> Result<EntryTotals, LedgerError> {
    let totals = EntryTotals::checked_from_lines(lines).ok_or(LedgerError::TotalsOverflow)?;
    if totals.is_balanced {
        Ok(totals)
    } else {
        Err(LedgerError::UnbalancedEntry {
            debit: totals.debit,
            credit: totals.credit,
            diff: totals.difference(),
        })
    }
}

/// Re-checks every stored entry and the global debit/credit totals.
///
/// Per-entry findings come first, in id order. The global finding, if any,
/// lists the unbalanced entries that explain it.
#[must_use]
pub fn validate_ledger(ledger: &Ledger) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();
    let mut unbalanced = Vec::new();
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for entry in ledger.entries() {
        let totals = entry.totals();
        total_debit = total_debit.saturating_add(totals.debit);
        total_credit = total_credit.saturating_add(totals.credit);

        if !totals.is_balanced {
            unbalanced.push(entry.id);
            discrepancies.push(
                Discrepancy::new(DiscrepancyKind::UnbalancedEntry, totals.debit, totals.credit)
                    .with_entries(vec![entry.id]),
            );
        }
    }

    if !within_tolerance(total_debit, total_credit) {
        discrepancies.push(
            Discrepancy::new(DiscrepancyKind::UnbalancedLedger, total_debit, total_credit)
                .with_entries(unbalanced),
        );
    }

    discrepancies
}

/// Checks the accounting equation of a balance sheet.
#[must_use]
pub fn validate_balance_sheet(sheet: &BalanceSheet) -> Vec<Discrepancy> {
    let assets = sheet.activos.total;
    let claims = sheet.total_pasivo_patrimonio;

    if sheet.ecuacion_cuadrada && within_tolerance(assets, claims) {
        Vec::new()
    } else {
        vec![Discrepancy::new(
            DiscrepancyKind::UnbalancedBalanceSheet,
            assets,
            claims,
        )]
    }
}

/// Checks that the trial balance columns agree.
///
/// The sumas are always checked; the saldos only in four-column format.
#[must_use]
pub fn validate_trial_balance(trial_balance: &TrialBalance) -> Vec<Discrepancy> {
    let totals = &trial_balance.totals;
    let mut discrepancies = Vec::new();

    if !within_tolerance(totals.suma_debe, totals.suma_haber) {
        discrepancies.push(Discrepancy::new(
            DiscrepancyKind::UnbalancedTrialBalance,
            totals.suma_debe,
            totals.suma_haber,
        ));
    }
    if let (Some(deudor), Some(acreedor)) = (totals.saldo_deudor, totals.saldo_acreedor)
        && !within_tolerance(deudor, acreedor)
    {
        discrepancies.push(Discrepancy::new(
            DiscrepancyKind::UnbalancedTrialBalance,
            deudor,
            acreedor,
        ));
    }

    discrepancies
}
