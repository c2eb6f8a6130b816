//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the chart, the ledger, reports and tax penalties
//! - Mapping of domain errors to JSON error responses
//! - The shared application state

pub mod error;
pub mod routes;

use axum::Router;
use partida_core::chart::{ChartOfAccounts, SharedChart};
use partida_core::ledger::{Ledger, SharedLedger};
use partida_core::reports::ReportCache;
use partida_core::tax::PenaltyConfig;
use partida_shared::AppConfig;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chart of accounts.
    pub chart: Arc<SharedChart>,
    /// Journal.
    pub ledger: Arc<SharedLedger>,
    /// Report cache, keyed by ledger version.
    pub reports: ReportCache,
    /// Tax penalty constants.
    pub penalty: Arc<PenaltyConfig>,
    /// Time box for a single report.
    pub report_timeout: Duration,
}

impl AppState {
    /// Creates the state for a freshly loaded chart and an empty ledger.
    #[must_use]
    pub fn new(chart: ChartOfAccounts, config: &AppConfig) -> Self {
        Self {
            chart: Arc::new(SharedChart::new(chart)),
            ledger: Arc::new(SharedLedger::new(Ledger::new())),
            reports: ReportCache::with_config(
                config.reports.cache_capacity,
                config.reports.cache_ttl_secs,
            ),
            penalty: Arc::new(PenaltyConfig::from(&config.tax)),
            report_timeout: Duration::from_secs(config.reports.timeout_secs),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
