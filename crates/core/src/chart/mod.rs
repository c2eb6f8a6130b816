//! Chart of accounts (*plan de cuentas*).
//!
//! The chart is loaded once from a flat list of accounts, validated as a
//! tree and then queried by code. Only active leaf accounts accept postings;
//! grouping accounts are reported through rollups.

pub mod error;
pub mod service;
pub mod shared;
pub mod tree;
pub mod types;

pub use error::ChartError;
pub use service::{ChartOfAccounts, DEFAULT_MAX_LEVEL};
pub use shared::SharedChart;
pub use tree::{AccountNode, AccountTree};
pub use types::{Account, AccountType, NormalSide};
