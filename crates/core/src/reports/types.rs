//! Report data types.

use chrono::NaiveDate;
use partida_shared::types::LedgerVersion;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::{Account, AccountType};
use crate::validation::Discrepancy;

/// Column layout of the trial balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialBalanceFormat {
    /// *Balance de sumas*: debit and credit sums only.
    TwoColumn,
    /// *Balance de sumas y saldos*: sums plus debit and credit balances.
    #[default]
    FourColumn,
}

impl TrialBalanceFormat {
    /// Returns true if the saldo columns are reported.
    #[must_use]
    pub fn has_saldos(self) -> bool {
        matches!(self, Self::FourColumn)
    }
}

impl std::str::FromStr for TrialBalanceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2" | "two_column" => Ok(Self::TwoColumn),
            "4" | "four_column" => Ok(Self::FourColumn),
            other => Err(format!("Unknown trial balance format: {other}")),
        }
    }
}

/// One account row of the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Total debits.
    pub suma_debe: Decimal,
    /// Total credits.
    pub suma_haber: Decimal,
    /// Debit balance, four-column format only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saldo_deudor: Option<Decimal>,
    /// Credit balance, four-column format only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saldo_acreedor: Option<Decimal>,
}

/// Column totals of the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceTotals {
    /// Sum of all debit sums.
    pub suma_debe: Decimal,
    /// Sum of all credit sums.
    pub suma_haber: Decimal,
    /// Sum of all debit balances, four-column format only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saldo_deudor: Option<Decimal>,
    /// Sum of all credit balances, four-column format only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saldo_acreedor: Option<Decimal>,
    /// Whether the sum columns agree within a cent.
    pub sumas_cuadradas: bool,
    /// Whether the saldo columns agree within a cent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saldos_cuadrados: Option<bool>,
}

/// Trial balance (*balance de comprobación*).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    /// Column layout.
    pub format: TrialBalanceFormat,
    /// One row per leaf account, in code order.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}

/// One account inside a statement section, amount in natural sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Depth in the hierarchy.
    pub level: u8,
    /// Balance in the section's natural sign.
    pub saldo: Decimal,
}

impl StatementLine {
    pub(crate) fn new(account: &Account, saldo: Decimal) -> Self {
        Self {
            code: account.code.clone(),
            name: account.name.clone(),
            level: account.level,
            saldo,
        }
    }
}

/// A statement section grouping every account of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatementSection {
    /// Leaf accounts, in code order.
    pub cuentas: Vec<StatementLine>,
    /// Grouping accounts with their rolled-up balance, in code order.
    pub grupos: Vec<StatementLine>,
    /// Section total, the sum of `cuentas`.
    pub total: Decimal,
}

/// Balance sheet (*balance general*) as of a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    /// Cut-off date.
    pub as_of: NaiveDate,
    /// Assets.
    pub activos: StatementSection,
    /// Liabilities.
    pub pasivos: StatementSection,
    /// Equity; the total includes `resultado_gestion`.
    pub patrimonio: StatementSection,
    /// Income minus expense up to the cut-off date.
    pub resultado_gestion: Decimal,
    /// `pasivos.total + patrimonio.total`.
    pub total_pasivo_patrimonio: Decimal,
    /// Whether assets equal liabilities plus equity within a cent.
    pub ecuacion_cuadrada: bool,
}

/// Income statement (*estado de resultados*) for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeStatement {
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Income.
    pub ingresos: StatementSection,
    /// Expenses and costs.
    pub gastos: StatementSection,
    /// `ingresos.total - gastos.total`.
    pub utilidad_neta: Decimal,
}

/// Global debit/credit totals of a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerCheck {
    /// Number of entries checked.
    pub entries: usize,
    /// Sum of all debits.
    pub total_debit: Decimal,
    /// Sum of all credits.
    pub total_credit: Decimal,
    /// Whether the totals agree within a cent.
    pub cuadrado: bool,
}

/// A report together with the cross-check findings over its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportWithWarnings<T> {
    /// The report.
    pub report: T,
    /// Discrepancies found in the ledger or the report; empty when clean.
    pub warnings: Vec<Discrepancy>,
    /// Ledger version the report was computed from.
    pub ledger_version: LedgerVersion,
}

/// Parameters identifying a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKey {
    /// Trial balance over entries dated within the range.
    TrialBalance {
        /// First day, open when absent.
        from: Option<NaiveDate>,
        /// Last day, open when absent.
        to: Option<NaiveDate>,
        /// Column layout.
        format: TrialBalanceFormat,
    },
    /// Balance sheet as of a date.
    BalanceSheet {
        /// Cut-off date.
        as_of: NaiveDate,
    },
    /// Income statement for a period.
    IncomeStatement {
        /// First day.
        from: NaiveDate,
        /// Last day.
        to: NaiveDate,
    },
    /// Ledger-wide cross-check.
    LedgerCheck,
}

/// Any generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Trial balance.
    TrialBalance(ReportWithWarnings<TrialBalance>),
    /// Balance sheet.
    BalanceSheet(ReportWithWarnings<BalanceSheet>),
    /// Income statement.
    IncomeStatement(ReportWithWarnings<IncomeStatement>),
    /// Ledger cross-check.
    LedgerCheck(ReportWithWarnings<LedgerCheck>),
}

impl Report {
    /// Ledger version the report was computed from.
    #[must_use]
    pub fn ledger_version(&self) -> LedgerVersion {
        match self {
            Self::TrialBalance(r) => r.ledger_version,
            Self::BalanceSheet(r) => r.ledger_version,
            Self::IncomeStatement(r) => r.ledger_version,
            Self::LedgerCheck(r) => r.ledger_version,
        }
    }

    /// Cross-check findings attached to the report.
    #[must_use]
    pub fn warnings(&self) -> &[Discrepancy] {
        match self {
            Self::TrialBalance(r) => &r.warnings,
            Self::BalanceSheet(r) => &r.warnings,
            Self::IncomeStatement(r) => &r.warnings,
            Self::LedgerCheck(r) => &r.warnings,
        }
    }
}
