//! Shared ledger handle with snapshot reads.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;
use partida_shared::types::{EntryId, LedgerVersion};

use super::error::LedgerError;
use super::store::Ledger;
use super::types::{ImportResult, JournalEntryInput, PostingResult, VoidRequest};
use crate::chart::ChartOfAccounts;

/// A ledger shared between writers and concurrent readers.
///
/// Writers are serialized by the write lock and mutate through
/// [`Arc::make_mut`], which copies the entry index when a snapshot is still
/// alive. Readers clone the current [`Arc`] and work on it without holding
/// any lock, so report generation never blocks postings and never sees a
/// half-appended entry.
#[derive(Debug, Default)]
pub struct SharedLedger {
    current: RwLock<Arc<Ledger>>,
}

impl SharedLedger {
    /// Wraps an existing ledger.
    #[must_use]
    pub fn new(ledger: Ledger) -> Self {
        Self {
            current: RwLock::new(Arc::new(ledger)),
        }
    }

    /// Returns a consistent read-only view of the ledger.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Ledger> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Current generation counter.
    #[must_use]
    pub fn version(&self) -> LedgerVersion {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .version()
    }

    /// See [`Ledger::append_entry`].
    ///
    /// # Errors
    ///
    /// Same as [`Ledger::append_entry`].
    pub fn append_entry(
        &self,
        chart: &ChartOfAccounts,
        input: JournalEntryInput,
    ) -> Result<PostingResult, LedgerError> {
        self.write(|ledger| ledger.append_entry(chart, input))
    }

    /// See [`Ledger::void_entry`].
    ///
    /// # Errors
    ///
    /// Same as [`Ledger::void_entry`].
    pub fn void_entry(&self, id: EntryId, date: NaiveDate, reason: Option<String>) -> Result<PostingResult, LedgerError> {
        let request = VoidRequest { date, reason };
        self.write(|ledger| ledger.void_entry(id, &request))
    }

    /// See [`Ledger::import_raw`].
    ///
    /// # Errors
    ///
    /// Same as [`Ledger::import_raw`].
    pub fn import_raw(
        &self,
        chart: &ChartOfAccounts,
        entries: Vec<JournalEntryInput>,
    ) -> Result<ImportResult, LedgerError> {
        self.write(|ledger| ledger.import_raw(chart, entries))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Ledger) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        f(Arc::make_mut(&mut guard))
    }
}
