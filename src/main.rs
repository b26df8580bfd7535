// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vignaharta API Server
//!
//! Serves site content, captures leads and authenticates the admin editor.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vignaharta_backend::{config::Config, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment; a missing secret in production is fatal
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        production = config.environment.is_production(),
        database = config.database.backend_name(),
        "Starting Vignaharta API"
    );

    // Open the store, create tables and seed defaults
    let store = db::initialize(&config).await?;

    let state = Arc::new(AppState::new(config.clone(), store));

    // Build router
    let app = vignaharta_backend::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("vignaharta_backend=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .try_init()?;
    Ok(())
}
