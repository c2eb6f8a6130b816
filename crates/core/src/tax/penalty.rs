//! Late-filing penalty and interest.

use chrono::NaiveDate;
use partida_shared::types::{MAX_AMOUNT, round_currency};
use rust_decimal::Decimal;

use super::error::TaxError;
use super::types::{DeclarationType, PenaltyConfig, PenaltyResult, TaxDeclaration};

/// Computes the fine and interest owed for filing `declaration` on `today`.
///
/// - IVA and IT: per-day UFV fine, at the low tier up to the boundary day and
///   at the high tier for each day after it
/// - IUE: a share of the tax plus a fixed UFV amount
/// - RC-IVA, ICE and anything else: a share of the tax
///
/// Interest is simple daily interest on the tax owed. Both amounts are
/// rounded to cents.
///
/// # Errors
///
/// Returns `InvalidInput` if the tax owed is negative or above [`MAX_AMOUNT`],
/// if any constant is negative, or if the penalty cannot be represented.
pub fn calculate_penalty(
    config: &PenaltyConfig,
    declaration: &TaxDeclaration,
    today: NaiveDate,
) -> Result<PenaltyResult, TaxError> {
    config.validate()?;
    let monto = declaration.monto_impuesto;
    if monto < Decimal::ZERO {
        return Err(TaxError::InvalidInput(
            "monto_impuesto must not be negative".to_string(),
        ));
    }
    if monto > MAX_AMOUNT {
        return Err(TaxError::InvalidInput(format!(
            "monto_impuesto must not exceed {MAX_AMOUNT}"
        )));
    }

    let dias_retraso = (today - declaration.fecha_vencimiento).num_days().max(0);
    if dias_retraso == 0 {
        return Ok(PenaltyResult::on_time());
    }

    let multa = round_currency(fine(config, &declaration.tipo, monto, dias_retraso).ok_or_else(out_of_range)?);
    let interes = monto
        .checked_mul(config.daily_interest_rate)
        .and_then(|daily| daily.checked_mul(Decimal::from(dias_retraso)))
        .map(round_currency)
        .ok_or_else(out_of_range)?;
    let total = multa.checked_add(interes).ok_or_else(out_of_range)?;

    Ok(PenaltyResult {
        dias_retraso,
        multa,
        interes,
        total,
    })
}

fn out_of_range() -> TaxError {
    TaxError::InvalidInput("penalty exceeds the representable range".to_string())
}

fn fine(config: &PenaltyConfig, tipo: &DeclarationType, monto: Decimal, dias: i64) -> Option<Decimal> {
    match tipo {
        DeclarationType::Iva | DeclarationType::It => {
            let low_days = dias.min(config.tier_boundary_days);
            let high_days = dias - low_days;
            let low = config.tier_low_ufv_per_day.checked_mul(Decimal::from(low_days))?;
            let high = config.tier_high_ufv_per_day.checked_mul(Decimal::from(high_days))?;
            low.checked_add(high)?.checked_mul(config.ufv)
        }
        DeclarationType::Iue => monto
            .checked_mul(config.iue_rate)?
            .checked_add(config.iue_fixed_ufv.checked_mul(config.ufv)?),
        DeclarationType::RcIva | DeclarationType::Ice | DeclarationType::Other(_) => {
            monto.checked_mul(config.default_rate)
        }
    }
}
