//! Tax declaration and penalty types.

use chrono::NaiveDate;
use partida_shared::config::TaxConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TaxError;

/// Kind of tax declaration.
///
/// Unknown kinds are kept verbatim and fall under the default penalty rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeclarationType {
    /// *Impuesto al Valor Agregado*.
    Iva,
    /// *Impuesto a las Transacciones*.
    It,
    /// *Impuesto sobre las Utilidades de las Empresas*.
    Iue,
    /// *Régimen Complementario al IVA*.
    RcIva,
    /// *Impuesto a los Consumos Específicos*.
    Ice,
    /// Any other declaration.
    Other(String),
}

impl DeclarationType {
    /// Returns the lowercase tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Iva => "iva",
            Self::It => "it",
            Self::Iue => "iue",
            Self::RcIva => "rc_iva",
            Self::Ice => "ice",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for DeclarationType {
    fn from(tag: String) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "iva" => Self::Iva,
            "it" => Self::It,
            "iue" => Self::Iue,
            "rc_iva" | "rc-iva" => Self::RcIva,
            "ice" => Self::Ice,
            _ => Self::Other(tag),
        }
    }
}

impl From<DeclarationType> for String {
    fn from(kind: DeclarationType) -> Self {
        match kind {
            DeclarationType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DeclarationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration whose late filing is being assessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDeclaration {
    /// Declaration kind.
    pub tipo: DeclarationType,
    /// Due date.
    pub fecha_vencimiento: NaiveDate,
    /// Tax owed.
    pub monto_impuesto: Decimal,
}

/// Penalty and interest for a late declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyResult {
    /// Days past the due date, zero when on time.
    pub dias_retraso: i64,
    /// Fine (*multa*).
    pub multa: Decimal,
    /// Interest (*interés*).
    pub interes: Decimal,
    /// `multa + interes`.
    pub total: Decimal,
}

impl PenaltyResult {
    /// Result for a declaration filed on time.
    #[must_use]
    pub fn on_time() -> Self {
        Self {
            dias_retraso: 0,
            multa: Decimal::ZERO,
            interes: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Constants of the penalty formulas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyConfig {
    /// Value of one UFV in bolivianos.
    pub ufv: Decimal,
    /// Interest rate per day of delay.
    pub daily_interest_rate: Decimal,
    /// Last day charged at the lower tier for IVA and IT.
    pub tier_boundary_days: i64,
    /// UFV per day up to the boundary.
    pub tier_low_ufv_per_day: Decimal,
    /// UFV per day after the boundary.
    pub tier_high_ufv_per_day: Decimal,
    /// Share of the tax owed charged for IUE.
    pub iue_rate: Decimal,
    /// Fixed UFV charged for IUE.
    pub iue_fixed_ufv: Decimal,
    /// Share of the tax owed charged for other declarations.
    pub default_rate: Decimal,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            ufv: Decimal::new(255, 2),
            daily_interest_rate: Decimal::new(164, 6),
            tier_boundary_days: 30,
            tier_low_ufv_per_day: Decimal::ONE_HUNDRED,
            tier_high_ufv_per_day: Decimal::new(200, 0),
            iue_rate: Decimal::new(5, 2),
            iue_fixed_ufv: Decimal::new(500, 0),
            default_rate: Decimal::new(3, 2),
        }
    }
}

impl PenaltyConfig {
    /// Checks that no constant is negative.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending constant.
    pub fn validate(&self) -> Result<(), TaxError> {
        let decimals = [
            ("ufv", self.ufv),
            ("daily_interest_rate", self.daily_interest_rate),
            ("tier_low_ufv_per_day", self.tier_low_ufv_per_day),
            ("tier_high_ufv_per_day", self.tier_high_ufv_per_day),
            ("iue_rate", self.iue_rate),
            ("iue_fixed_ufv", self.iue_fixed_ufv),
            ("default_rate", self.default_rate),
        ];
        if let Some((name, _)) = decimals.iter().find(|(_, value)| *value < Decimal::ZERO) {
            return Err(TaxError::InvalidInput(format!("{name} must not be negative")));
        }
        if self.tier_boundary_days < 0 {
            return Err(TaxError::InvalidInput(
                "tier_boundary_days must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&TaxConfig> for PenaltyConfig {
    fn from(config: &TaxConfig) -> Self {
        Self {
            ufv: config.ufv,
            daily_interest_rate: config.daily_interest_rate,
            ..Self::default()
        }
    }
}
