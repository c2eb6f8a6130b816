//! Subtree totals for grouping accounts.

use std::collections::HashMap;

use super::types::{AccountBalance, BalanceMap};
use crate::chart::{ChartError, ChartOfAccounts};

/// Sums leaf balances up the account hierarchy.
///
/// Each subtree is computed once per calculator, so rolling up several
/// siblings (or a parent after its children) reuses earlier work. Only
/// active leaves contribute.
#[derive(Debug)]
pub struct RollupCalculator<'a> {
    chart: &'a ChartOfAccounts,
    balances: &'a BalanceMap,
    memo: HashMap<usize, AccountBalance>,
}

impl<'a> RollupCalculator<'a> {
    /// Creates a calculator over one balance map.
    #[must_use]
    pub fn new(chart: &'a ChartOfAccounts, balances: &'a BalanceMap) -> Self {
        Self {
            chart,
            balances,
            memo: HashMap::new(),
        }
    }

    /// Sums the four columns over the active descendant leaves of `code`.
    ///
    /// A leaf rolls up to its own balance when active, to zero otherwise.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this code.
    pub fn rollup(&mut self, code: &str) -> Result<AccountBalance, ChartError> {
        let position = self
            .chart
            .position(code)
            .ok_or_else(|| ChartError::NotFound(code.to_string()))?;
        Ok(self.rollup_at(position))
    }

    /// Same as [`RollupCalculator::rollup`] for a chart position.
    pub fn rollup_at(&mut self, position: usize) -> AccountBalance {
        if let Some(cached) = self.memo.get(&position) {
            return *cached;
        }

        let chart = self.chart;
        let children = chart.children_at(position);
        let total = if children.is_empty() {
            let account = &chart.accounts()[position];
            if account.active {
                self.balances.get(&account.code).copied().unwrap_or_default()
            } else {
                AccountBalance::default()
            }
        } else {
            let mut total = AccountBalance::default();
            for &child in children {
                total += self.rollup_at(child);
            }
            total
        };

        self.memo.insert(position, total);
        total
    }
}

/// One-off rollup of a single account.
///
/// # Errors
///
/// Returns `NotFound` if no account has this code.
pub fn rollup(
    chart: &ChartOfAccounts,
    balances: &BalanceMap,
    parent_code: &str,
) -> Result<AccountBalance, ChartError> {
    RollupCalculator::new(chart, balances).rollup(parent_code)
}
