//! Currency rounding and comparison helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` with two decimal places
//! (bolivianos and centavos).

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by every currency amount.
pub const CURRENCY_SCALE: u32 = 2;

/// Smallest amount two totals may differ by and still reconcile (0.01).
///
/// Only differences strictly below one centavo are absorbed, so amounts
/// already rounded to [`CURRENCY_SCALE`] compare exactly.
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, CURRENCY_SCALE);

/// Largest amount a single journal line or tax base may carry (10^15).
///
/// `Decimal` tops out near 7.9 * 10^28, so sums over any realistic number
/// of capped amounts stay representable.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Adds amounts, returning `None` on overflow.
#[must_use]
pub fn checked_total<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Rounds an amount to two decimal places, half away from zero.
///
/// For the non-negative amounts carried by journal lines this is
/// round-half-up: 10.005 becomes 10.01.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns true if `a` and `b` differ by less than [`TOLERANCE`].
///
/// Amounts too far apart to subtract never reconcile.
#[must_use]
pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    a.checked_sub(b).is_some_and(|diff| diff.abs() < TOLERANCE)
}
