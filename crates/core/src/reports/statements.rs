//! Financial statements derived from a balance map.
//!
//! These functions are pure: the same chart and balances always produce
//! the same report, and every list comes out in account code order.

use chrono::NaiveDate;
use partida_shared::types::within_tolerance;

use super::error::ReportError;
use super::types::{
    BalanceSheet, IncomeStatement, StatementLine, StatementSection, TrialBalance,
    TrialBalanceFormat, TrialBalanceRow, TrialBalanceTotals,
};
use crate::balance::{AccountBalance, BalanceMap, RollupCalculator};
use crate::chart::{AccountType, ChartOfAccounts};

/// Builds the trial balance over every leaf account.
///
/// Leaves missing from `balances` are reported with zero movement.
#[must_use]
pub fn trial_balance(
    chart: &ChartOfAccounts,
    balances: &BalanceMap,
    format: TrialBalanceFormat,
) -> TrialBalance {
    let with_saldos = format.has_saldos();
    let mut total = AccountBalance::default();

    let rows = chart
        .leaves()
        .map(|account| {
            let balance = balances.get(&account.code).copied().unwrap_or_default();
            total += balance;
            TrialBalanceRow {
                code: account.code.clone(),
                name: account.name.clone(),
                account_type: account.account_type,
                suma_debe: balance.suma_debe,
                suma_haber: balance.suma_haber,
                saldo_deudor: with_saldos.then_some(balance.saldo_deudor),
                saldo_acreedor: with_saldos.then_some(balance.saldo_acreedor),
            }
        })
        .collect();

    TrialBalance {
        format,
        rows,
        totals: TrialBalanceTotals {
            suma_debe: total.suma_debe,
            suma_haber: total.suma_haber,
            saldo_deudor: with_saldos.then_some(total.saldo_deudor),
            saldo_acreedor: with_saldos.then_some(total.saldo_acreedor),
            sumas_cuadradas: within_tolerance(total.suma_debe, total.suma_haber),
            saldos_cuadrados: with_saldos
                .then(|| within_tolerance(total.saldo_deudor, total.saldo_acreedor)),
        },
    }
}

/// Builds the balance sheet from balances cut off at `as_of`.
///
/// Income and expense accounts are not closed into equity by entries, so
/// their net (*resultado de la gestión*) is added to the equity total for
/// the equation to hold.
#[must_use]
pub fn balance_sheet(chart: &ChartOfAccounts, balances: &BalanceMap, as_of: NaiveDate) -> BalanceSheet {
    let mut rollups = RollupCalculator::new(chart, balances);
    let activos = section(chart, balances, &mut rollups, AccountType::Asset);
    let pasivos = section(chart, balances, &mut rollups, AccountType::Liability);
    let mut patrimonio = section(chart, balances, &mut rollups, AccountType::Equity);

    let ingresos = section(chart, balances, &mut rollups, AccountType::Income);
    let gastos = section(chart, balances, &mut rollups, AccountType::Expense);
    let resultado_gestion = ingresos.total.saturating_sub(gastos.total);
    patrimonio.total = patrimonio.total.saturating_add(resultado_gestion);

    let total_pasivo_patrimonio = pasivos.total.saturating_add(patrimonio.total);
    let ecuacion_cuadrada = within_tolerance(activos.total, total_pasivo_patrimonio);

    BalanceSheet {
        as_of,
        activos,
        pasivos,
        patrimonio,
        resultado_gestion,
        total_pasivo_patrimonio,
        ecuacion_cuadrada,
    }
}

/// Builds the income statement from balances over `period_start..=period_end`.
///
/// # Errors
///
/// Returns `InvalidDateRange` if the period starts after it ends.
pub fn income_statement(
    chart: &ChartOfAccounts,
    balances: &BalanceMap,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<IncomeStatement, ReportError> {
    if period_start > period_end {
        return Err(ReportError::InvalidDateRange {
            start: period_start,
            end: period_end,
        });
    }

    let mut rollups = RollupCalculator::new(chart, balances);
    let ingresos = section(chart, balances, &mut rollups, AccountType::Income);
    let gastos = section(chart, balances, &mut rollups, AccountType::Expense);
    let utilidad_neta = ingresos.total.saturating_sub(gastos.total);

    Ok(IncomeStatement {
        period_start,
        period_end,
        ingresos,
        gastos,
        utilidad_neta,
    })
}

fn section(
    chart: &ChartOfAccounts,
    balances: &BalanceMap,
    rollups: &mut RollupCalculator<'_>,
    account_type: AccountType,
) -> StatementSection {
    let side = account_type.normal_side();
    let mut section = StatementSection::default();

    for (position, account) in chart.accounts().iter().enumerate() {
        if account.account_type != account_type {
            continue;
        }
        if chart.children_at(position).is_empty() {
            let saldo = balances
                .get(&account.code)
                .copied()
                .unwrap_or_default()
                .natural(side);
            section.total = section.total.saturating_add(saldo);
            section.cuentas.push(StatementLine::new(account, saldo));
        } else {
            let saldo = rollups.rollup_at(position).natural(side);
            section.grupos.push(StatementLine::new(account, saldo));
        }
    }

    section
}
