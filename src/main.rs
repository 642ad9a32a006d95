// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! MeeChain Onboarding API Server
//!
//! Backs the wallet onboarding flow: social sign-in, security setup,
//! smart wallet provisioning, starter missions and the test-token faucet.

use meechain_onboarding::{config::Config, db::MemoryStore, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        faucet_amount = config.faucet_amount,
        faucet_cooldown_secs = config.faucet_cooldown_secs,
        "Starting MeeChain onboarding API"
    );

    // In-memory store with default tokens and missions
    let store = MemoryStore::seeded();
    tracing::info!(
        tokens = store.get_tokens().len(),
        missions = store.get_missions().len(),
        "Store initialized"
    );

    let state = Arc::new(AppState::new(config.clone(), store));

    // Build router
    let app = meechain_onboarding::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::from_default_env()
        .add_directive("meechain_onboarding=debug".parse()?)
        .add_directive("info".parse()?);

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
