//! Ledgerbook Service - HTTP API for ledger-backed user, bank and file records
//!
//! This is the main entry point for the ledgerbook service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerbook_service::{create_router, AppState, ServiceConfig};
use ledgerbook_store::RocksWorldState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ledgerbook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ledgerbook Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        init_ledger_on_start = config.init_ledger_on_start,
        "Service configuration loaded"
    );

    // Initialize RocksDB world state
    tracing::info!(path = %config.data_dir, "Opening RocksDB world state");
    let world_state = Arc::new(RocksWorldState::open(&config.data_dir)?);

    // Build app state
    let state = AppState::new(world_state, config.clone());

    if config.init_ledger_on_start {
        let seeded = state.contract.init_ledger()?;
        tracing::info!(seeded, "Seed banks checked");
    }

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
