//! The append-only journal.

use std::sync::Arc;

use chrono::NaiveDate;
use partida_shared::types::{EntryId, LedgerVersion};

use super::entry::{EntryOrigin, EntryStatus, JournalEntry, JournalLine};
use super::error::LedgerError;
use super::reversal::reversing_entry;
use super::types::{ImportResult, JournalEntryInput, PostingResult, VoidRequest};
use crate::chart::ChartOfAccounts;
use crate::validation::{validate_entry, validate_ledger};

/// Ordered, append-only sequence of journal entries.
///
/// Entry ids are gap-free: the entry with id `n` sits at position `n - 1`.
/// A secondary index keeps positions sorted by `(date, id)` for range
/// queries. Entries are shared through [`Arc`] so cloning a ledger for a
/// snapshot copies pointers only.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Arc<JournalEntry>>,
    by_date: Vec<usize>,
    version: LedgerVersion,
}

impl Ledger {
    /// Creates an empty ledger at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, voided and reversals included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current generation counter.
    #[must_use]
    pub fn version(&self) -> LedgerVersion {
        self.version
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&JournalEntry> {
        self.position(id).map(|p| self.entries[p].as_ref())
    }

    /// All entries in acceptance (id) order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &JournalEntry> + Clone + '_ {
        self.entries.iter().map(AsRef::as_ref)
    }

    /// Entries dated within `from..=to`, ordered by date then id.
    ///
    /// The iterator borrows the ledger and can be cloned to restart it.
    /// An inverted range yields nothing.
    pub fn entries_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Iterator<Item = &JournalEntry> + Clone + Send + '_ {
        let start = self
            .by_date
            .partition_point(|&p| self.entries[p].date < from);
        let end = self
            .by_date
            .partition_point(|&p| self.entries[p].date <= to)
            .max(start);

        self.by_date[start..end]
            .iter()
            .map(move |&p| self.entries[p].as_ref())
    }

    /// Entries with at least one line on `code`, ordered by date then id.
    pub fn entries_for_account<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a JournalEntry> + Clone + 'a {
        self.by_date
            .iter()
            .map(move |&p| self.entries[p].as_ref())
            .filter(move |entry| entry.references(code))
    }

    /// Returns true if any line of any entry posts to `code`.
    #[must_use]
    pub fn references_account(&self, code: &str) -> bool {
        self.entries.iter().any(|entry| entry.references(code))
    }

    /// Validates and appends a journal entry.
    ///
    /// # Errors
    ///
    /// - `EmptyLines` if fewer than two lines or no line with movement
    /// - `UnknownAccount`, `NotPostable` or `InactiveAccount` for a bad line account
    /// - `UnbalancedEntry` if debits and credits differ by a cent or more
    pub fn append_entry(
        &mut self,
        chart: &ChartOfAccounts,
        input: JournalEntryInput,
    ) -> Result<PostingResult, LedgerError> {
        let movement = input.lines.iter().filter(|l| !l.is_placeholder()).count();
        if input.lines.len() < 2 || movement == 0 {
            return Err(LedgerError::EmptyLines {
                count: input.lines.len(),
            });
        }
        check_postable(chart, &input.lines)?;
        validate_entry(&input.lines)?;

        let entry = JournalEntry {
            id: self.next_id(),
            date: input.date,
            concept: input.concept,
            reference: input.reference,
            status: EntryStatus::Posted,
            origin: EntryOrigin::Journal,
            lines: input.lines,
            reverses: None,
            reversed_by: None,
        };
        self.push(entry.clone());
        Ok(self.commit(entry))
    }

    /// Voids an entry by appending its reversal.
    ///
    /// The original keeps its lines and is marked voided with a link to the
    /// reversal. Both changes land under a single version bump.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound` if no entry has this id
    /// - `AlreadyVoided` if the entry was voided before
    /// - `CannotVoidReversal` if the entry is itself a reversal
    /// - `ReversalBeforeOriginal` if `request.date` precedes the entry's date
    pub fn void_entry(
        &mut self,
        id: EntryId,
        request: &VoidRequest,
    ) -> Result<PostingResult, LedgerError> {
        let position = self.position(id).ok_or(LedgerError::EntryNotFound(id))?;
        let original = self.entries[position].as_ref();
        if original.is_voided() {
            return Err(LedgerError::AlreadyVoided(id));
        }
        if original.is_reversal() {
            return Err(LedgerError::CannotVoidReversal(id));
        }
        if request.date < original.date {
            return Err(LedgerError::ReversalBeforeOriginal {
                id,
                original_date: original.date,
                reversal_date: request.date,
            });
        }

        let reversal_id = self.next_id();
        let reversal = reversing_entry(original, reversal_id, request.date, request.reason.as_deref());

        let original = Arc::make_mut(&mut self.entries[position]);
        original.status = EntryStatus::Voided;
        original.reversed_by = Some(reversal_id);

        self.push(reversal.clone());
        Ok(self.commit(reversal))
    }

    /// Bulk-loads legacy entries without the per-entry balance check.
    ///
    /// Every line must still name an existing leaf account; inactive accounts
    /// are accepted since historical data may predate their deactivation.
    /// The batch is all-or-nothing. Imbalances are reported back as
    /// discrepancies over the resulting ledger.
    ///
    /// # Errors
    ///
    /// - `EmptyLines` if an entry has no lines
    /// - `UnknownAccount` or `NotPostable` for a bad line account
    pub fn import_raw(
        &mut self,
        chart: &ChartOfAccounts,
        entries: Vec<JournalEntryInput>,
    ) -> Result<ImportResult, LedgerError> {
        for input in &entries {
            if input.lines.is_empty() {
                return Err(LedgerError::EmptyLines { count: 0 });
            }
            for line in &input.lines {
                check_account(chart, line.account_code(), false)?;
            }
        }

        let mut ids = Vec::with_capacity(entries.len());
        for input in entries {
            let id = self.next_id();
            self.push(JournalEntry {
                id,
                date: input.date,
                concept: input.concept,
                reference: input.reference,
                status: EntryStatus::Posted,
                origin: EntryOrigin::Imported,
                lines: input.lines,
                reverses: None,
                reversed_by: None,
            });
            ids.push(id);
        }
        if !ids.is_empty() {
            self.version = self.version.next();
        }

        Ok(ImportResult {
            ids,
            version: self.version,
            discrepancies: validate_ledger(self),
        })
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        let position = usize::try_from(id.value()).ok()?.checked_sub(1)?;
        (position < self.entries.len()).then_some(position)
    }

    fn next_id(&self) -> EntryId {
        EntryId::new(self.entries.len() as u64 + 1)
    }

    fn push(&mut self, entry: JournalEntry) {
        let position = self.entries.len();
        // Same-date entries already in the index have smaller ids.
        let slot = self
            .by_date
            .partition_point(|&p| self.entries[p].date <= entry.date);
        self.entries.push(Arc::new(entry));
        self.by_date.insert(slot, position);
    }

    fn commit(&mut self, entry: JournalEntry) -> PostingResult {
        self.version = self.version.next();
        PostingResult {
            entry,
            version: self.version,
        }
    }
}

fn check_postable(chart: &ChartOfAccounts, lines: &[JournalLine]) -> Result<(), LedgerError> {
    lines
        .iter()
        .try_for_each(|line| check_account(chart, line.account_code(), true))
}

fn check_account(chart: &ChartOfAccounts, code: &str, require_active: bool) -> Result<(), LedgerError> {
    let account = chart
        .get(code)
        .ok_or_else(|| LedgerError::UnknownAccount(code.to_string()))?;
    if !chart.is_leaf(code) {
        return Err(LedgerError::NotPostable(code.to_string()));
    }
    if require_active && !account.active {
        return Err(LedgerError::InactiveAccount(code.to_string()));
    }
    Ok(())
}
