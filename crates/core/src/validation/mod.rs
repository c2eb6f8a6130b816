//! Invariant checks over entries, the ledger and derived reports.
//!
//! Entry checks reject; everything else reports [`Discrepancy`] records so a
//! best-effort report can still be produced over inconsistent data.

pub mod checks;
pub mod discrepancy;

#[cfg(test)]
mod checks_props;

pub use checks::{validate_balance_sheet, validate_entry, validate_ledger, validate_trial_balance};
pub use discrepancy::{Discrepancy, DiscrepancyKind};
