//! Property-based tests for the balance calculator.
//!
//! - Property 1: balances do not depend on acceptance order
//! - Property 2: sumas over all accounts agree for a journal-built ledger
//! - Property 3: voiding every entry brings every account back to zero

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::compute_account_balances;
use super::types::AccountBalance;
use crate::chart::{Account, AccountType, ChartOfAccounts};
use crate::ledger::{JournalEntryInput, JournalLine, Ledger, VoidRequest};
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

/// Strategy to generate a two-line entry moving 0.01 to 10,000.00 between accounts.
fn entry() -> impl Strategy<Value = JournalEntryInput> {
    (0..CODES.len(), 0..CODES.len(), 1i64..1_000_000i64, 1u32..=28).prop_map(
        |(debit, credit, cents, day)| {
            let amount = Decimal::new(cents, 2);
            JournalEntryInput {
                date: NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
                concept: "Movimiento".to_string(),
                reference: String::new(),
                lines: vec![
                    JournalLine::debit(CODES[debit], amount).unwrap(),
                    JournalLine::credit(CODES[credit], amount).unwrap(),
                ],
            }
        },
    )
}

fn build(chart: &ChartOfAccounts, entries: Vec<JournalEntryInput>) -> Ledger {
    let mut ledger = Ledger::new();
    for input in entries {
        ledger.append_entry(chart, input).unwrap();
    }
    ledger
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: any permutation of the same entries yields the same balances.
    #[test]
    fn prop_order_independence(
        (original, shuffled) in prop::collection::vec(entry(), 0..40)
            .prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle())),
        as_of_day in 1u32..=28,
    ) {
        let chart = chart();
        let as_of = Some(NaiveDate::from_ymd_opt(2026, 6, as_of_day).unwrap());

        let first = compute_account_balances(&chart, &build(&chart, original), as_of).unwrap();
        let second = compute_account_balances(&chart, &build(&chart, shuffled), as_of).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property 2: Σ suma_debe == Σ suma_haber and Σ saldo_deudor == Σ saldo_acreedor.
    #[test]
    fn prop_sumas_agree(entries in prop::collection::vec(entry(), 0..40)) {
        let chart = chart();
        let balances = compute_account_balances(&chart, &build(&chart, entries), None).unwrap();
        let total: AccountBalance = balances.values().copied().sum();

        prop_assert_eq!(total.suma_debe, total.suma_haber);
        prop_assert_eq!(total.saldo_deudor, total.saldo_acreedor);
    }

    /// Property 3: a fully voided ledger nets to zero everywhere.
    #[test]
    fn prop_void_round_trip(entries in prop::collection::vec(entry(), 1..20)) {
        let chart = chart();
        let mut ledger = build(&chart, entries);
        let request = VoidRequest {
            date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            reason: None,
        };
        for id in 1..=ledger.len() as u64 {
            ledger.void_entry(EntryId::new(id), &request).unwrap();
        }

        let balances = compute_account_balances(&chart, &ledger, None).unwrap();
        for balance in balances.values() {
            prop_assert_eq!(balance.saldo_deudor, Decimal::ZERO);
            prop_assert_eq!(balance.saldo_acreedor, Decimal::ZERO);
        }
    }
}
