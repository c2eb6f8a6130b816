//! Partida API Server
//!
//! Main entry point for the Partida accounting service. Loads the chart of
//! accounts named in the configuration and serves the API over an empty
//! ledger.

use std::path::Path;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use partida_api::{AppState, create_router};
use partida_core::chart::{Account, ChartOfAccounts};
use partida_core::tax::PenaltyConfig;
use partida_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "partida=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    PenaltyConfig::from(&config.tax)
        .validate()
        .context("Invalid tax configuration")?;

    let chart = load_chart(Path::new(&config.chart.path), config.chart.max_level)?;
    info!(
        path = %config.chart.path,
        accounts = chart.len(),
        max_level = chart.max_level(),
        "Chart of accounts loaded"
    );

    // Create application state
    let state = AppState::new(chart, &config);
    info!(
        timeout_secs = config.reports.timeout_secs,
        cache_capacity = config.reports.cache_capacity,
        "Report engine configured"
    );

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Reads and validates the JSON chart definition.
fn load_chart(path: &Path, max_level: u8) -> anyhow::Result<ChartOfAccounts> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chart definition {}", path.display()))?;
    let accounts: Vec<Account> = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed chart definition {}", path.display()))?;

    ChartOfAccounts::load_with_max_level(accounts, max_level)
        .with_context(|| format!("Invalid chart of accounts in {}", path.display()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
