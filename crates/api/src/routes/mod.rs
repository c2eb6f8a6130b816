//! API route definitions.

use std::time::Duration;

use axum::Router;
use partida_shared::AppError;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::{AppState, error::ApiError};

pub mod accounts;
pub mod entries;
pub mod health;
pub mod reports;
pub mod tax;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(entries::routes())
        .merge(reports::routes())
        .merge(tax::routes())
}

/// Runs CPU-bound work on the blocking pool, time-boxed.
///
/// On expiry the token is cancelled so the work stops at its next check.
pub(crate) async fn run_blocking<T, F>(timeout: Duration, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&CancellationToken) -> Result<T, ApiError> + Send + 'static,
{
    let token = CancellationToken::new();
    let worker_token = token.clone();
    let task = tokio::task::spawn_blocking(move || work(&worker_token));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(AppError::Internal(format!("Worker task failed: {e}")).into()),
        Err(_) => {
            token.cancel();
            warn!(timeout_secs = timeout.as_secs(), "Report generation timed out");
            Err(AppError::Timeout(format!(
                "Report did not finish within {} seconds",
                timeout.as_secs()
            ))
            .into())
        }
    }
}
