//! Derived per-account balances.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use partida_shared::types::round_currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::NormalSide;

/// Balances of every chart account, keyed by code in code order.
pub type BalanceMap = BTreeMap<String, AccountBalance>;

/// Movement sums and net balance of one account (or one subtree).
///
/// The saldo columns follow the sign of `suma_debe - suma_haber`: a debit
/// surplus lands in `saldo_deudor`, a credit surplus in `saldo_acreedor`,
/// and at most one of the two is nonzero for a single account. An account
/// whose balance sits against its normal side (an overdrawn bank account)
/// therefore shows up in the opposite column, which is how the four-column
/// trial balance exposes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Total debits (*suma debe*).
    pub suma_debe: Decimal,
    /// Total credits (*suma haber*).
    pub suma_haber: Decimal,
    /// Debit balance (*saldo deudor*).
    pub saldo_deudor: Decimal,
    /// Credit balance (*saldo acreedor*).
    pub saldo_acreedor: Decimal,
}

impl AccountBalance {
    /// Derives the balance from raw movement sums, rounded to cents.
    #[must_use]
    pub fn from_movements(suma_debe: Decimal, suma_haber: Decimal) -> Self {
        let suma_debe = round_currency(suma_debe);
        let suma_haber = round_currency(suma_haber);
        let net = suma_debe - suma_haber;

        Self {
            suma_debe,
            suma_haber,
            saldo_deudor: net.max(Decimal::ZERO),
            saldo_acreedor: (-net).max(Decimal::ZERO),
        }
    }

    /// Net movement, `suma_debe - suma_haber`.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.suma_debe - self.suma_haber
    }

    /// Saldo expressed in the natural sign of `side`.
    ///
    /// Positive when the balance sits on the normal side.
    #[must_use]
    pub fn natural(&self, side: NormalSide) -> Decimal {
        side.natural_balance(self.saldo_deudor, self.saldo_acreedor)
    }

    /// Returns true if there was no movement at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.suma_debe.is_zero() && self.suma_haber.is_zero()
    }
}

/// Component-wise sum, saturating at the `Decimal` range.
impl Add for AccountBalance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            suma_debe: self.suma_debe.saturating_add(rhs.suma_debe),
            suma_haber: self.suma_haber.saturating_add(rhs.suma_haber),
            saldo_deudor: self.saldo_deudor.saturating_add(rhs.saldo_deudor),
            saldo_acreedor: self.saldo_acreedor.saturating_add(rhs.saldo_acreedor),
        }
    }
}

impl AddAssign for AccountBalance {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for AccountBalance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
