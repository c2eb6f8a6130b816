//! Journal entry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use partida_core::ledger::{JournalEntry, JournalEntryInput, LedgerError};
use partida_shared::types::{EntryId, PageRequest, PageResponse};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{AppState, error::ApiError};

/// Creates the journal entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/import", post(import_entries))
        .route("/entries/{id}", get(get_entry))
        .route("/entries/{id}/void", post(void_entry))
}

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// First day (inclusive, YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Last day (inclusive, YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed, default: 1).
    pub page: Option<u32>,
    /// Entries per page (default: 50, max: 200).
    pub per_page: Option<u32>,
}

/// Request body for voiding an entry.
#[derive(Debug, Default, Deserialize)]
pub struct VoidEntryRequest {
    /// Date of the reversal. Defaults to today.
    pub date: Option<NaiveDate>,
    /// Reason recorded in the reversal's concept.
    pub reason: Option<String>,
}

/// POST `/entries` - Validate and post a journal entry.
async fn create_entry(
    State(state): State<AppState>,
    Json(input): Json<JournalEntryInput>,
) -> Result<impl IntoResponse, ApiError> {
    // Chart read lock is held for the whole append.
    let result = state
        .chart
        .with_read(|chart| state.ledger.append_entry(chart, input))
        .inspect_err(|e| warn!(error = %e, "Journal entry rejected"))?;

    info!(
        entry_id = %result.entry.id,
        version = %result.version,
        "Journal entry posted"
    );
    Ok((StatusCode::CREATED, Json(result)))
}

/// GET `/entries` - Entries ordered by date then id, paginated.
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Json<PageResponse<JournalEntry>> {
    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };

    let ledger = state.ledger.snapshot();
    let entries = ledger.entries_in_range(
        query.from.unwrap_or(NaiveDate::MIN),
        query.to.unwrap_or(NaiveDate::MAX),
    );
    let total = entries.clone().count();

    Json(PageResponse::paginate(entries.cloned(), total, &page))
}

/// GET `/entries/{id}` - One entry.
async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<JournalEntry>, ApiError> {
    let id = EntryId::new(id);
    let ledger = state.ledger.snapshot();
    let entry = ledger.get(id).ok_or(LedgerError::EntryNotFound(id))?;
    Ok(Json(entry.clone()))
}

/// POST `/entries/{id}/void` - Void an entry by posting its reversal.
async fn void_entry(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Option<Json<VoidEntryRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.unwrap_or_default();
    let id = EntryId::new(id);
    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());

    let result = state.ledger.void_entry(id, date, request.reason)?;

    info!(
        entry_id = %id,
        reversal_id = %result.entry.id,
        version = %result.version,
        "Journal entry voided"
    );
    Ok((StatusCode::CREATED, Json(result)))
}

/// POST `/entries/import` - Bulk-load legacy entries.
///
/// Imbalanced entries are accepted and reported as discrepancies.
async fn import_entries(
    State(state): State<AppState>,
    Json(entries): Json<Vec<JournalEntryInput>>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .chart
        .with_read(|chart| state.ledger.import_raw(chart, entries))?;

    info!(
        imported = result.ids.len(),
        discrepancies = result.discrepancies.len(),
        version = %result.version,
        "Journal entries imported"
    );
    if !result.discrepancies.is_empty() {
        warn!(count = result.discrepancies.len(), "Imported ledger has discrepancies");
    }
    Ok((StatusCode::CREATED, Json(result)))
}
