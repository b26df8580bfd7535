// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod auth;
pub mod content;
pub mod extract;
pub mod leads;

use crate::middleware::cors::reject_disallowed_origin;
use crate::middleware::security::add_security_headers;
use crate::AppState;
use axum::extract::{DefaultBodyLimit, State};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub use extract::ApiJson;

/// Request bodies larger than this are refused with 413.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub const SERVICE_NAME: &str = "vignaharta-backend";

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    /// "sqlite" or "postgres"
    pub database: String,
    pub build_id: String,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
        database: state.store.backend_name().to_string(),
        build_id,
    })
}

#[derive(Serialize)]
struct IndexResponse {
    ok: bool,
    message: &'static str,
    health: &'static str,
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        ok: true,
        message: "Vignaharta backend is running",
        health: "/api/health",
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = state.cors.layer();

    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .merge(auth::routes(state.clone()))
        .merge(content::routes(state.clone()))
        .merge(leads::routes(state.clone()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            reject_disallowed_origin,
        ))
        .layer(middleware::from_fn(add_security_headers))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
