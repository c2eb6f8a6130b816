//! Reversing entries for voided journal entries.
//!
//! A posted entry is never edited. Voiding appends a new entry whose lines
//! mirror the original with debit and credit swapped, so the pair nets to
//! zero on every account from the reversal date onward.

use chrono::NaiveDate;
use partida_shared::types::EntryId;

use super::entry::{EntryOrigin, EntryStatus, JournalEntry};

/// Builds the reversing entry for `original`.
///
/// The reversal keeps the original's reference and line order.
#[must_use]
pub fn reversing_entry(
    original: &JournalEntry,
    id: EntryId,
    date: NaiveDate,
    reason: Option<&str>,
) -> JournalEntry {
    let concept = match reason {
        Some(reason) if !reason.trim().is_empty() => {
            format!("Reversión del asiento #{}. Motivo: {}", original.id, reason.trim())
        }
        _ => format!("Reversión del asiento #{}: {}", original.id, original.concept),
    };

    JournalEntry {
        id,
        date,
        concept,
        reference: original.reference.clone(),
        status: EntryStatus::Posted,
        origin: EntryOrigin::Journal,
        lines: original.lines.iter().map(|line| line.swapped()).collect(),
        reverses: Some(original.id),
        reversed_by: None,
    }
}
