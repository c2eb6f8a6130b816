//! Property-based tests for the invariant checks.
//!
//! - Property 1: `validate_entry` accepts exactly the lines whose sums agree within a cent
//! - Property 2: the global finding appears iff the per-entry differences do not cancel out

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::checks::{validate_entry, validate_ledger};
use super::discrepancy::DiscrepancyKind;
use crate::chart::{Account, AccountType, ChartOfAccounts};
use crate::ledger::{JournalEntryInput, JournalLine, Ledger};
use partida_shared::types::within_tolerance;

/// Strategy to generate amounts from 0.00 to 1,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1: acceptance matches the tolerance rule.
    #[test]
    fn prop_validate_entry_matches_tolerance(debit in amount(), credit in amount()) {
        let lines = vec![
            JournalLine::debit("1111", debit).unwrap(),
            JournalLine::credit("4111", credit).unwrap(),
        ];
        prop_assert_eq!(validate_entry(&lines).is_ok(), within_tolerance(debit, credit));
    }

    /// Property 2: imported imbalances surface per entry and globally.
    #[test]
    fn prop_imported_imbalances_are_reported(
        pairs in prop::collection::vec((amount(), amount()), 1..10),
    ) {
        let chart = ChartOfAccounts::load(vec![
            Account::new("1111", "Caja", AccountType::Asset, 1, None),
            Account::new("4111", "Ventas", AccountType::Income, 1, None),
        ])
        .unwrap();
        let inputs: Vec<JournalEntryInput> = pairs
            .iter()
            .map(|&(debit, credit)| JournalEntryInput {
                date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                concept: "Migrado".to_string(),
                reference: String::new(),
                lines: vec![
                    JournalLine::debit("1111", debit).unwrap(),
                    JournalLine::credit("4111", credit).unwrap(),
                ],
            })
            .collect();

        let mut ledger = Ledger::new();
        ledger.import_raw(&chart, inputs).unwrap();
        let findings = validate_ledger(&ledger);

        let unbalanced = pairs.iter().filter(|(d, c)| d != c).count();
        let per_entry = findings.iter().filter(|d| d.kind == DiscrepancyKind::UnbalancedEntry).count();
        prop_assert_eq!(per_entry, unbalanced);

        let total_debit: Decimal = pairs.iter().map(|(d, _)| *d).sum();
        let total_credit: Decimal = pairs.iter().map(|(_, c)| *c).sum();
        let global = findings.iter().any(|d| d.kind == DiscrepancyKind::UnbalancedLedger);
        prop_assert_eq!(global, total_debit != total_credit);
    }
}
