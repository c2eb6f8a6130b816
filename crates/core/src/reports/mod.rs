//! Financial report generation.
//!
//! This module turns balance maps into financial statements:
//! - Trial Balance (*balance de sumas y saldos*)
//! - Balance Sheet (*balance general*)
//! - Income Statement (*estado de resultados*)
//! - Ledger cross-check
//!
//! [`ReportService`] runs a report over a ledger snapshot and attaches the
//! invariant checks as warnings; [`ReportCache`] memoizes results per
//! ledger version.

pub mod cache;
pub mod error;
pub mod service;
pub mod statements;
pub mod types;


pub use cache::{CachedReport, ReportCache};
pub use error::ReportError;
pub use service::ReportService;
pub use statements::{balance_sheet, income_statement, trial_balance};
pub use types::*;
