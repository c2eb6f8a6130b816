//! Chart of accounts domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side on which an account's balance normally sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalSide {
    /// Debit-normal accounts (Asset, Expense).
    Debit,
    /// Credit-normal accounts (Liability, Equity, Income).
    Credit,
}

impl NormalSide {
    /// Returns the movement expressed in this side's natural sign.
    ///
    /// Debit-normal: `debit - credit`. Credit-normal: `credit - debit`.
    #[must_use]
    pub fn natural_balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Account classification (*tipo de cuenta*).
///
/// Spanish names from Bolivian charts (`activo`, `pasivo`, ...) are accepted
/// as aliases when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Activo.
    #[serde(alias = "activo")]
    Asset,
    /// Pasivo.
    #[serde(alias = "pasivo")]
    Liability,
    /// Patrimonio.
    #[serde(alias = "patrimonio")]
    Equity,
    /// Ingreso.
    #[serde(alias = "ingreso", alias = "ingresos")]
    Income,
    /// Gasto (including costs).
    #[serde(alias = "gasto", alias = "gastos", alias = "egreso")]
    Expense,
}

impl AccountType {
    /// All account types in statement order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Income,
        Self::Expense,
    ];

    /// Returns the normal balance side implied by the type.
    #[must_use]
    pub const fn normal_side(self) -> NormalSide {
        match self {
            Self::Asset | Self::Expense => NormalSide::Debit,
            Self::Liability | Self::Equity | Self::Income => NormalSide::Credit,
        }
    }

    /// Returns the lowercase English name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" | "activo" => Ok(Self::Asset),
            "liability" | "pasivo" => Ok(Self::Liability),
            "equity" | "patrimonio" => Ok(Self::Equity),
            "income" | "ingreso" | "ingresos" => Ok(Self::Income),
            "expense" | "gasto" | "gastos" | "egreso" => Ok(Self::Expense),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// A single account of the chart (*cuenta*).
///
/// Field names are snake_case on the wire; the camelCase names used by the
/// exported browser chart definitions are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account code (e.g. "1111").
    pub code: String,
    /// Display name (e.g. "Caja").
    pub name: String,
    /// Account classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Depth in the hierarchy, 1 for root groups.
    pub level: u8,
    /// Code of the parent account; required when `level > 1`.
    #[serde(default, alias = "parentCode")]
    pub parent_code: Option<String>,
    /// Whether the account accepts postings.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Whether postings must carry subsidiary detail.
    #[serde(default, alias = "requiresDetail")]
    pub requires_detail: bool,
}

fn default_active() -> bool {
    true
}

impl Account {
    /// Creates an active account without detail requirements.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        level: u8,
        parent_code: Option<&str>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            level,
            parent_code: parent_code.map(str::to_string),
            active: true,
            requires_detail: false,
        }
    }

    /// Returns the normal balance side derived from the account type.
    #[must_use]
    pub const fn normal_side(&self) -> NormalSide {
        self.account_type.normal_side()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_normal_side_derived_from_type() {
        assert_eq!(AccountType::Asset.normal_side(), NormalSide::Debit);
        assert_eq!(AccountType::Expense.normal_side(), NormalSide::Debit);
        assert_eq!(AccountType::Liability.normal_side(), NormalSide::Credit);
        assert_eq!(AccountType::Equity.normal_side(), NormalSide::Credit);
        assert_eq!(AccountType::Income.normal_side(), NormalSide::Credit);
    }

    #[test]
    fn test_natural_balance() {
        assert_eq!(NormalSide::Debit.natural_balance(dec!(100), dec!(30)), dec!(70));
        assert_eq!(NormalSide::Credit.natural_balance(dec!(100), dec!(30)), dec!(-70));
        assert_eq!(NormalSide::Credit.natural_balance(dec!(0), dec!(250)), dec!(250));
    }

    #[test]
    fn test_account_type_from_str_accepts_spanish() {
        assert_eq!(AccountType::from_str("activo").unwrap(), AccountType::Asset);
        assert_eq!(AccountType::from_str("PASIVO").unwrap(), AccountType::Liability);
        assert_eq!(AccountType::from_str("income").unwrap(), AccountType::Income);
        assert_eq!(AccountType::from_str("gasto").unwrap(), AccountType::Expense);
        assert!(AccountType::from_str("revenue_x").is_err());
    }

    #[test]
    fn test_account_deserializes_from_chart_json() {
        let json = r#"{
            "code": "1111",
            "name": "Caja",
            "type": "activo",
            "level": 4,
            "parentCode": "111"
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::Asset);
        assert_eq!(account.parent_code.as_deref(), Some("111"));
        assert!(account.active);
        assert!(!account.requires_detail);
        assert_eq!(account.normal_side(), NormalSide::Debit);
    }
}
