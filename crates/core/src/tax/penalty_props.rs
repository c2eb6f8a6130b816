//! Property-based tests for the penalty calculator.
//!
//! - Property 1: penalties never decrease as the delay grows
//! - Property 2: `total` is always `multa + interes`

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::penalty::calculate_penalty;
use super::types::{DeclarationType, PenaltyConfig, TaxDeclaration};

fn declaration_type() -> impl Strategy<Value = DeclarationType> {
    prop_oneof![
        Just(DeclarationType::Iva),
        Just(DeclarationType::It),
        Just(DeclarationType::Iue),
        Just(DeclarationType::RcIva),
        Just(DeclarationType::Ice),
        Just(DeclarationType::Other("iehd".to_string())),
    ]
}

/// Strategy to generate amounts from 0.00 to 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    /// Property 1: one more day of delay never lowers the fine or the interest.
    #[test]
    fn prop_penalty_monotonic_in_delay(
        tipo in declaration_type(),
        monto in amount(),
        days in 0i64..400,
    ) {
        let config = PenaltyConfig::default();
        let due = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let declaration = TaxDeclaration { tipo, fecha_vencimiento: due, monto_impuesto: monto };

        let earlier = calculate_penalty(&config, &declaration, due + Duration::days(days)).unwrap();
        let later = calculate_penalty(&config, &declaration, due + Duration::days(days + 1)).unwrap();

        prop_assert!(later.multa >= earlier.multa);
        prop_assert!(later.interes >= earlier.interes);
        prop_assert_eq!(later.dias_retraso, days + 1);
    }

    /// Property 2: the total is the sum of its parts.
    #[test]
    fn prop_total_is_sum(
        tipo in declaration_type(),
        monto in amount(),
        days in 0i64..400,
    ) {
        let due = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let result = calculate_penalty(
            &PenaltyConfig::default(),
            &TaxDeclaration { tipo, fecha_vencimiento: due, monto_impuesto: monto },
            due + Duration::days(days),
        ).unwrap();

        prop_assert_eq!(result.total, result.multa + result.interes);
    }
}
