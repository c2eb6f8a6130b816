//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use partida_core::balance::{AccountBalance, RollupCalculator, compute_account_balances_cancellable};
use partida_core::chart::{Account, AccountTree, AccountType};
use partida_core::ledger::JournalEntry;
use partida_core::reports::ReportError;
use partida_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::run_blocking;
use crate::{AppState, error::ApiError};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/tree", get(get_tree))
        .route("/accounts/{code}", get(get_account).delete(delete_account))
        .route("/accounts/{code}/balance", get(get_account_balance))
        .route("/accounts/{code}/entries", get(get_account_entries))
}

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Filter by account type (English or Spanish name).
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

/// Query parameters for an account balance.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    /// Cut-off date (YYYY-MM-DD). Defaults to today.
    pub as_of: Option<NaiveDate>,
}

/// Response for an account balance.
#[derive(Debug, Serialize)]
pub struct AccountBalanceResponse {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Cut-off date.
    pub as_of: NaiveDate,
    /// Whether the balance is a rollup over descendant leaves.
    pub rollup: bool,
    /// The balance.
    pub balance: AccountBalance,
}

/// GET `/accounts` - List accounts, optionally of one type.
async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let filter = query
        .account_type
        .as_deref()
        .map(str::parse::<AccountType>)
        .transpose()
        .map_err(AppError::Validation)?;

    let accounts = state.chart.with_read(|chart| match filter {
        Some(account_type) => chart.get_by_type(account_type).into_iter().cloned().collect(),
        None => chart.accounts().to_vec(),
    });
    Ok(Json(accounts))
}

/// GET `/accounts/tree` - The account hierarchy.
async fn get_tree(State(state): State<AppState>) -> Json<AccountTree> {
    Json(state.chart.with_read(|chart| chart.tree()))
}

/// GET `/accounts/{code}` - One account.
async fn get_account(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let account = state
        .chart
        .with_read(|chart| chart.get_by_code(&code).cloned())?;
    Ok(Json(account))
}

/// POST `/accounts` - Add an account to the chart.
async fn create_account(
    State(state): State<AppState>,
    Json(account): Json<Account>,
) -> Result<impl IntoResponse, ApiError> {
    let created = account.clone();
    state.chart.update(|chart| chart.add_account(account))?;
    state.reports.invalidate_all();

    info!(code = %created.code, "Account created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE `/accounts/{code}` - Remove an unused leaf account.
async fn delete_account(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, ApiError> {
    // Chart write lock first, then the ledger: no entry can start
    // referencing the account while the check runs.
    state.chart.update(|chart| {
        let ledger = state.ledger.snapshot();
        chart.remove_account(&code, |c| ledger.references_account(c))
    })?;
    state.reports.invalidate_all();

    info!(code = %code, "Account removed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/accounts/{code}/balance` - Balance as of a date, rolled up for
/// grouping accounts.
async fn get_account_balance(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<AccountBalanceResponse>, ApiError> {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let chart = state.chart.snapshot();
    let ledger = state.ledger.snapshot();

    let response = run_blocking(state.report_timeout, move |cancel| {
        let account = chart.get_by_code(&code)?;
        let balances = compute_account_balances_cancellable(&chart, &ledger, Some(as_of), cancel)
            .map_err(ReportError::from)?;

        let rollup = !chart.is_leaf(&code);
        let balance = if rollup {
            RollupCalculator::new(&chart, &balances).rollup(&code)?
        } else {
            balances.get(&code).copied().unwrap_or_default()
        };

        Ok(AccountBalanceResponse {
            code: account.code.clone(),
            name: account.name.clone(),
            as_of,
            rollup,
            balance,
        })
    })
    .await?;

    Ok(Json(response))
}

/// GET `/accounts/{code}/entries` - Entries with a line on the account.
async fn get_account_entries(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    state.chart.with_read(|chart| chart.get_by_code(&code).map(|_| ()))?;

    let ledger = state.ledger.snapshot();
    let entries = ledger.entries_for_account(&code).cloned().collect();
    Ok(Json(entries))
}
