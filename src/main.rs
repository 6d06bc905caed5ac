// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CleanCity API Server
//!
//! Serves the waste reporting, cleanup drive, dustbin and Green Points
//! reward flows over an in-memory store.

use cleancity::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        seed_mock_data = config.seed_mock_data,
        submit_delay_ms = config.submit_delay_ms,
        "Starting CleanCity API"
    );

    let state = AppState::new(config.clone()).expect("Failed to initialize application state");
    let snapshot = state.db.snapshot().await;
    tracing::info!(
        users = snapshot.users.len(),
        dustbins = snapshot.dustbins.len(),
        reports = snapshot.reports.len(),
        drives = snapshot.drives.len(),
        stores = snapshot.stores.len(),
        "Store initialized"
    );

    // Build router
    let app = cleancity::routes::create_router(Arc::new(state));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cleancity=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
