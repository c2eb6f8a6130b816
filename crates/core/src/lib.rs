//! Core business logic for Partida.
//!
//! This crate contains pure accounting logic with ZERO web or I/O dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `chart` - Chart of accounts (*plan de cuentas*) and its hierarchy
//! - `ledger` - Double-entry journal with append-only posting and voids
//! - `balance` - Per-account balances and hierarchical rollups
//! - `reports` - Trial balance, balance sheet and income statement
//! - `validation` - Entry, ledger and statement invariant checks
//! - `tax` - Late-filing penalty and interest for tax declarations

pub mod balance;
pub mod chart;
pub mod ledger;
pub mod reports;
pub mod tax;
pub mod validation;
