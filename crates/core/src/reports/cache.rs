//! Report caching using Moka.
//!
//! Entries are keyed by the report parameters together with the chart and
//! ledger versions they were computed from. Both versions travel inside the
//! snapshots handed to [`ReportCache::run_cached`], so a report built from an
//! older chart or ledger can only ever be stored under that older key.

use moka::sync::Cache;
use partida_shared::types::{ChartVersion, LedgerVersion};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::error::ReportError;
use super::service::ReportService;
use super::types::{Report, ReportKey};
use crate::chart::ChartOfAccounts;
use crate::ledger::Ledger;

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

type CacheKey = (ReportKey, ChartVersion, LedgerVersion);

/// A report served by [`ReportCache::run_cached`].
#[derive(Debug, Clone)]
pub struct CachedReport {
    /// The report.
    pub report: Arc<Report>,
    /// Whether it came from the cache.
    pub cached: bool,
}

/// Cache for generated reports. Thread-safe; clones share storage.
#[derive(Clone)]
pub struct ReportCache {
    cache: Cache<CacheKey, Arc<Report>>,
}

impl ReportCache {
    /// Creates a report cache with default settings.
    ///
    /// Default: 256 entries max, 5 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a report cache with custom configuration.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Generates a report, returning the cached copy for the same key, chart
    /// version and ledger version if there is one.
    ///
    /// Failed generations are not cached.
    ///
    /// # Errors
    ///
    /// Same as [`ReportService::generate`].
    pub fn run_cached(
        &self,
        chart: &ChartOfAccounts,
        ledger: &Ledger,
        key: ReportKey,
        cancel: &CancellationToken,
    ) -> Result<CachedReport, ReportError> {
        let cache_key = (key, chart.version(), ledger.version());

        if let Some(report) = self.cache.get(&cache_key) {
            return Ok(CachedReport {
                report,
                cached: true,
            });
        }

        let report = Arc::new(ReportService::generate(chart, ledger, &key, cancel)?);
        self.cache.insert(cache_key, Arc::clone(&report));

        Ok(CachedReport {
            report,
            cached: false,
        })
    }

    /// Drops every cached entry.
    ///
    /// Stale entries never match a newer version, so this only frees memory.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReportCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
