//! Double-entry journal.
//!
//! - Journal lines and entries, validated on construction
//! - The append-only [`Ledger`] with range and account queries
//! - Reversing entries for voids
//! - [`SharedLedger`], the snapshot-isolated handle used by the API

pub mod entry;
pub mod error;
pub mod reversal;
pub mod shared;
pub mod store;
pub mod types;

#[cfg(test)]
mod store_props;

pub use entry::{EntryOrigin, EntryStatus, JournalEntry, JournalLine};
pub use error::LedgerError;
pub use shared::SharedLedger;
pub use store::Ledger;
pub use types::{EntryTotals, ImportResult, JournalEntryInput, PostingResult, VoidRequest};
