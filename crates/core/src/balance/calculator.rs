//! Aggregation of ledger lines into per-account balances.
//!
//! Entries are folded in parallel with rayon and the partial sums merged
//! afterwards. Addition of decimals is exact and commutative, so the result
//! does not depend on how the work is split.

use std::collections::HashMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use super::error::BalanceError;
use super::types::{AccountBalance, BalanceMap};
use crate::chart::ChartOfAccounts;
use crate::ledger::{JournalEntry, Ledger};

/// Raw debit/credit sums per account code.
type Movements<'a> = HashMap<&'a str, (Decimal, Decimal)>;

/// Balances of every chart account from the first entry up to `as_of`.
///
/// Without `as_of` the whole ledger is aggregated. Voided entries and
/// their reversals both count; together they net to zero from the
/// reversal date onward.
///
/// # Errors
///
/// Returns `Overflow` if an account's sums leave the `Decimal` range.
pub fn compute_account_balances(
    chart: &ChartOfAccounts,
    ledger: &Ledger,
    as_of: Option<NaiveDate>,
) -> Result<BalanceMap, BalanceError> {
    compute_range_balances(chart, ledger, None, as_of)
}

/// Balances of every chart account over entries dated within `from..=to`.
///
/// Open ends default to the beginning and end of the ledger.
///
/// # Errors
///
/// Returns `Overflow` if an account's sums leave the `Decimal` range.
pub fn compute_range_balances(
    chart: &ChartOfAccounts,
    ledger: &Ledger,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<BalanceMap, BalanceError> {
    let entries = ledger.entries_in_range(
        from.unwrap_or(NaiveDate::MIN),
        to.unwrap_or(NaiveDate::MAX),
    );
    let movements = accumulate(entries, || Ok(()))?;
    Ok(finalize(chart, movements))
}

/// Cancellable form of [`compute_account_balances`].
///
/// # Errors
///
/// Returns `Cancelled` once `cancel` fires, or `Overflow` as the plain form.
pub fn compute_account_balances_cancellable(
    chart: &ChartOfAccounts,
    ledger: &Ledger,
    as_of: Option<NaiveDate>,
    cancel: &CancellationToken,
) -> Result<BalanceMap, BalanceError> {
    compute_range_balances_cancellable(chart, ledger, None, as_of, cancel)
}

/// Cancellable form of [`compute_range_balances`].
///
/// The token is polled once per entry by every worker.
///
/// # Errors
///
/// Returns `Cancelled` once `cancel` fires, or `Overflow` as the plain form.
pub fn compute_range_balances_cancellable(
    chart: &ChartOfAccounts,
    ledger: &Ledger,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    cancel: &CancellationToken,
) -> Result<BalanceMap, BalanceError> {
    if cancel.is_cancelled() {
        return Err(BalanceError::Cancelled);
    }
    let entries = ledger.entries_in_range(
        from.unwrap_or(NaiveDate::MIN),
        to.unwrap_or(NaiveDate::MAX),
    );
    let movements = accumulate(entries, || {
        if cancel.is_cancelled() {
            Err(BalanceError::Cancelled)
        } else {
            Ok(())
        }
    })?;
    Ok(finalize(chart, movements))
}

fn accumulate<'a, I, C>(entries: I, check: C) -> Result<Movements<'a>, BalanceError>
where
    I: Iterator<Item = &'a JournalEntry> + Send,
    C: Fn() -> Result<(), BalanceError> + Sync + Send,
{
    entries
        .par_bridge()
        .try_fold(Movements::new, |mut sums, entry| -> Result<Movements<'a>, BalanceError> {
            check()?;
            for line in entry.lines.iter().filter(|l| !l.is_placeholder()) {
                add_movement(&mut sums, line.account_code(), line.debit_amount(), line.credit_amount())?;
            }
            Ok(sums)
        })
        .try_reduce(Movements::new, |mut left, right| -> Result<Movements<'a>, BalanceError> {
            for (code, (debit, credit)) in right {
                add_movement(&mut left, code, debit, credit)?;
            }
            Ok(left)
        })
}

fn add_movement<'a>(
    sums: &mut Movements<'a>,
    code: &'a str,
    debit: Decimal,
    credit: Decimal,
) -> Result<(), BalanceError> {
    let slot = sums.entry(code).or_default();
    let overflow = || BalanceError::Overflow(code.to_string());
    slot.0 = slot.0.checked_add(debit).ok_or_else(overflow)?;
    slot.1 = slot.1.checked_add(credit).ok_or_else(overflow)?;
    Ok(())
}

fn finalize(chart: &ChartOfAccounts, mut movements: Movements<'_>) -> BalanceMap {
    chart
        .accounts()
        .iter()
        .map(|account| {
            let balance = movements
                .remove(account.code.as_str())
                .map_or_else(AccountBalance::default, |(debit, credit)| {
                    AccountBalance::from_movements(debit, credit)
                });
            (account.code.clone(), balance)
        })
        .collect()
}
