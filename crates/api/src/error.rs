//! Conversion of domain errors into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use partida_core::chart::ChartError;
use partida_core::ledger::LedgerError;
use partida_core::reports::ReportError;
use partida_core::tax::TaxError;
use partida_shared::AppError;
use serde_json::json;

/// Error returned by handlers.
///
/// Renders as `{"error": code, "message": text}` plus `"details"` when the
/// underlying error carries a structured payload.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        });
        if let Some(details) = self.0.details() {
            body["details"] = details.clone();
        }

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

fn domain(status: u16, code: &'static str, message: String, details: Option<serde_json::Value>) -> ApiError {
    ApiError(AppError::Domain {
        status,
        code,
        message,
        details,
    })
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        domain(err.http_status_code(), err.error_code(), err.to_string(), None)
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let details = match &err {
            LedgerError::UnbalancedEntry { debit, credit, diff } => Some(json!({
                "debit": debit,
                "credit": credit,
                "diff": diff,
            })),
            _ => None,
        };
        domain(err.http_status_code(), err.error_code(), err.to_string(), details)
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        domain(err.http_status_code(), err.error_code(), err.to_string(), None)
    }
}

impl From<TaxError> for ApiError {
    fn from(err: TaxError) -> Self {
        domain(err.http_status_code(), err.error_code(), err.to_string(), None)
    }
}
