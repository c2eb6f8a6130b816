//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use partida_shared::types::{ChartVersion, LedgerVersion};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Number of accounts in the chart.
    pub accounts: usize,
    /// Current chart version.
    pub chart_version: ChartVersion,
    /// Current ledger version.
    pub ledger_version: LedgerVersion,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        accounts: state.chart.with_read(|chart| chart.len()),
        chart_version: state.chart.version(),
        ledger_version: state.ledger.version(),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
