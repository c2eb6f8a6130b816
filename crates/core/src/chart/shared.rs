//! Shared chart handle.

use std::sync::{Arc, PoisonError, RwLock};

use partida_shared::types::ChartVersion;

use super::service::ChartOfAccounts;

/// Chart of accounts shared between request handlers.
///
/// Readers take cheap [`Arc`] snapshots. Edits run on a private copy that
/// replaces the current chart only when the edit succeeds, so a failed edit
/// never leaves a half-validated chart behind.
///
/// When both the chart and the ledger are locked, the chart is locked first.
#[derive(Debug, Default)]
pub struct SharedChart {
    current: RwLock<Arc<ChartOfAccounts>>,
}

impl SharedChart {
    /// Wraps a validated chart.
    #[must_use]
    pub fn new(chart: ChartOfAccounts) -> Self {
        Self {
            current: RwLock::new(Arc::new(chart)),
        }
    }

    /// Returns the current chart.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ChartOfAccounts> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Generation of the current chart.
    #[must_use]
    pub fn version(&self) -> ChartVersion {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .version()
    }

    /// Runs `f` while holding the chart read lock.
    ///
    /// Postings use this so that the accounts they validated against cannot
    /// be removed before the entry lands in the ledger.
    pub fn with_read<T>(&self, f: impl FnOnce(&ChartOfAccounts) -> T) -> T {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Applies an edit atomically.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns; the current chart is then untouched.
    pub fn update<T, E>(&self, f: impl FnOnce(&mut ChartOfAccounts) -> Result<T, E>) -> Result<T, E> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = ChartOfAccounts::clone(&guard);
        let output = f(&mut next)?;
        *guard = Arc::new(next);
        Ok(output)
    }
}
