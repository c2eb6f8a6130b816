//! Property-based tests for the ledger.
//!
//! - Property 1: every accepted entry balances within one cent
//! - Property 2: a ledger built through append and void has no discrepancies
//! - Property 3: ids stay gap-free and versions strictly increase

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::JournalLine;
use super::store::Ledger;
use super::types::{JournalEntryInput, VoidRequest};
use crate::chart::{Account, AccountType, ChartOfAccounts};
use crate::validation::validate_ledger;
use partida_shared::types::EntryId;

const CODES: [&str; 4] = ["1111", "2111", "4111", "5111"];

fn chart() -> ChartOfAccounts {
    ChartOfAccounts::load(vec![
        Account::new("1111", "Caja", AccountType::Asset, 1, None),
        Account::new("2111", "Proveedores", AccountType::Liability, 1, None),
        Account::new("4111", "Ventas", AccountType::Income, 1, None),
        Account::new("5111", "Costo de ventas", AccountType::Expense, 1, None),
    ])
    .unwrap()
}

/// Strategy to generate amounts from 0.01 to 10,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a line on a random account with a random side.
fn line() -> impl Strategy<Value = JournalLine> {
    (0..CODES.len(), any::<bool>(), amount()).prop_map(|(i, is_debit, amount)| {
        if is_debit {
            JournalLine::debit(CODES[i], amount).unwrap()
        } else {
            JournalLine::credit(CODES[i], amount).unwrap()
        }
    })
}

/// Strategy to generate a balanced entry: random debits plus one
/// balancing credit.
fn balanced_entry() -> impl Strategy<Value = JournalEntryInput> {
    (
        prop::collection::vec((0..CODES.len(), amount()), 1..5),
        0..CODES.len(),
        1u32..28,
    )
        .prop_map(|(debits, credit_account, day)| {
            let total: Decimal = debits.iter().map(|(_, a)| *a).sum();
            let mut lines: Vec<JournalLine> = debits
                .into_iter()
                .map(|(i, a)| JournalLine::debit(CODES[i], a).unwrap())
                .collect();
            lines.push(JournalLine::credit(CODES[credit_account], total).unwrap());
            JournalEntryInput {
                date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
                concept: "Asiento".to_string(),
                reference: String::new(),
                lines,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1: whatever the lines, an accepted entry balances.
    #[test]
    fn prop_accepted_entries_balance(lines in prop::collection::vec(line(), 0..6)) {
        let chart = chart();
        let mut ledger = Ledger::new();
        let input = JournalEntryInput {
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            concept: "Aleatorio".to_string(),
            reference: String::new(),
            lines,
        };

        match ledger.append_entry(&chart, input) {
            Ok(result) => {
                prop_assert!(result.entry.totals().is_balanced);
                prop_assert_eq!(ledger.len(), 1);
            }
            Err(_) => prop_assert!(ledger.is_empty()),
        }
    }

    /// Property 2: append and void never leave a discrepancy behind.
    #[test]
    fn prop_journal_ledger_has_no_discrepancies(
        entries in prop::collection::vec(balanced_entry(), 1..20),
        voids in prop::collection::vec(any::<prop::sample::Index>(), 0..5),
    ) {
        let chart = chart();
        let mut ledger = Ledger::new();
        for entry in entries {
            ledger.append_entry(&chart, entry).unwrap();
        }

        let count = ledger.len();
        for index in voids {
            let id = EntryId::new(index.index(count) as u64 + 1);
            let request = VoidRequest {
                date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                reason: None,
            };
            // Repeated picks hit AlreadyVoided, which must leave no trace.
            let _ = ledger.void_entry(id, &request);
        }

        prop_assert!(validate_ledger(&ledger).is_empty());
    }

    /// Property 3: ids are 1..=n in acceptance order and every success bumps the version.
    #[test]
    fn prop_ids_gap_free(entries in prop::collection::vec(balanced_entry(), 1..30)) {
        let chart = chart();
        let mut ledger = Ledger::new();
        let mut last_version = ledger.version();

        for (n, entry) in entries.into_iter().enumerate() {
            let result = ledger.append_entry(&chart, entry).unwrap();
            prop_assert_eq!(result.entry.id, EntryId::new(n as u64 + 1));
            prop_assert!(result.version > last_version);
            last_version = result.version;
        }
    }
}
