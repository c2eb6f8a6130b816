//! Report routes.
//!
//! Reports are computed on the blocking pool over a snapshot of the chart
//! and the ledger, time-boxed, and served from the cache when the ledger
//! has not moved since.

use axum::{
    Router,
    extract::{Query, State},
    http::header::HeaderName,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{Datelike, NaiveDate, Utc};
use partida_core::reports::{ReportKey, TrialBalanceFormat};
use partida_shared::AppError;
use serde::Deserialize;
use tracing::debug;

use super::run_blocking;
use crate::{AppState, error::ApiError};

/// Response header telling whether the report came from the cache.
pub const REPORT_CACHE_HEADER: HeaderName = HeaderName::from_static("x-report-cache");

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/trial-balance", get(get_trial_balance))
        .route("/reports/balance-sheet", get(get_balance_sheet))
        .route("/reports/income-statement", get(get_income_statement))
        .route("/reports/ledger-check", get(get_ledger_check))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the trial balance.
#[derive(Debug, Deserialize)]
pub struct TrialBalanceQuery {
    /// First day (inclusive). Open when absent.
    pub from: Option<NaiveDate>,
    /// Last day (inclusive). Open when absent.
    pub to: Option<NaiveDate>,
    /// `2` for sums only, `4` (default) for sums and balances.
    pub format: Option<String>,
}

/// Query parameters for the balance sheet.
#[derive(Debug, Deserialize)]
pub struct BalanceSheetQuery {
    /// Cut-off date (defaults to today).
    pub as_of: Option<NaiveDate>,
}

/// Query parameters for the income statement.
#[derive(Debug, Deserialize)]
pub struct IncomeStatementQuery {
    /// Start date (defaults to January 1st of the end date's year).
    pub from: Option<NaiveDate>,
    /// End date (defaults to today).
    pub to: Option<NaiveDate>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/reports/trial-balance`
async fn get_trial_balance(
    State(state): State<AppState>,
    Query(query): Query<TrialBalanceQuery>,
) -> Result<Response, ApiError> {
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<TrialBalanceFormat>().map_err(AppError::Validation)?,
        None => TrialBalanceFormat::default(),
    };

    generate(
        &state,
        ReportKey::TrialBalance {
            from: query.from,
            to: query.to,
            format,
        },
    )
    .await
}

/// GET `/reports/balance-sheet`
async fn get_balance_sheet(
    State(state): State<AppState>,
    Query(query): Query<BalanceSheetQuery>,
) -> Result<Response, ApiError> {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    generate(&state, ReportKey::BalanceSheet { as_of }).await
}

/// GET `/reports/income-statement`
async fn get_income_statement(
    State(state): State<AppState>,
    Query(query): Query<IncomeStatementQuery>,
) -> Result<Response, ApiError> {
    let to = query.to.unwrap_or_else(|| Utc::now().date_naive());
    let from = match query.from {
        Some(from) => from,
        None => NaiveDate::from_ymd_opt(to.year(), 1, 1)
            .ok_or_else(|| AppError::Validation(format!("No January 1st for {to}")))?,
    };

    generate(&state, ReportKey::IncomeStatement { from, to }).await
}

/// GET `/reports/ledger-check`
async fn get_ledger_check(State(state): State<AppState>) -> Result<Response, ApiError> {
    generate(&state, ReportKey::LedgerCheck).await
}

async fn generate(state: &AppState, key: ReportKey) -> Result<Response, ApiError> {
    let chart = state.chart.snapshot();
    let ledger = state.ledger.snapshot();
    let cache = state.reports.clone();

    let served = run_blocking(state.report_timeout, move |cancel| {
        cache
            .run_cached(&chart, &ledger, key, cancel)
            .map_err(ApiError::from)
    })
    .await?;

    debug!(
        ?key,
        cached = served.cached,
        ledger_version = %served.report.ledger_version(),
        warnings = served.report.warnings().len(),
        "Report served"
    );

    let cache_status = if served.cached { "hit" } else { "miss" };
    Ok((
        [(REPORT_CACHE_HEADER, cache_status)],
        Json(served.report.as_ref()),
    )
        .into_response())
}
