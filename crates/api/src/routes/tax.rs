//! Tax penalty routes.

use axum::{Json, Router, extract::State, routing::post};
use chrono::{NaiveDate, Utc};
use partida_core::tax::{DeclarationType, PenaltyResult, TaxDeclaration, calculate_penalty};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// Creates the tax routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tax/penalty", post(compute_penalty))
}

/// Request body for a penalty calculation.
#[derive(Debug, Deserialize)]
pub struct PenaltyRequest {
    /// Declaration kind (`iva`, `it`, `iue`, ...).
    pub tipo: DeclarationType,
    /// Due date.
    pub fecha_vencimiento: NaiveDate,
    /// Tax owed.
    pub monto_impuesto: Decimal,
    /// Filing date. Defaults to today.
    pub today: Option<NaiveDate>,
}

/// POST `/tax/penalty` - Fine and interest for a late declaration.
async fn compute_penalty(
    State(state): State<AppState>,
    Json(request): Json<PenaltyRequest>,
) -> Result<Json<PenaltyResult>, ApiError> {
    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    let declaration = TaxDeclaration {
        tipo: request.tipo,
        fecha_vencimiento: request.fecha_vencimiento,
        monto_impuesto: request.monto_impuesto,
    };

    Ok(Json(calculate_penalty(&state.penalty, &declaration, today)?))
}
