//! Balance calculator.
//!
//! Balances are pure derivations over a chart and a ledger snapshot. Every
//! chart account appears in the output, including accounts with no movement.

pub mod calculator;
pub mod error;
pub mod rollup;
pub mod types;

#[cfg(test)]
mod calculator_props;

pub use calculator::{
    compute_account_balances, compute_account_balances_cancellable, compute_range_balances,
    compute_range_balances_cancellable,
};
pub use error::BalanceError;
pub use rollup::{RollupCalculator, rollup};
pub use types::{AccountBalance, BalanceMap};
