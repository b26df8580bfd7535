// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lead capture (public) and lead listing (admin) routes.

use crate::db::MAX_LEADS;
use crate::error::{AppError, Result};
use crate::middleware::{require_auth, AuthAdmin};
use crate::models::{LeadRecord, LeadSubmission};
use crate::routes::content::OkResponse;
use crate::routes::ApiJson;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/leads",
        post(create_lead)
            .merge(get(list_leads).route_layer(middleware::from_fn_with_state(state, require_auth))),
    )
}

/// Store a contact-form submission.
async fn create_lead(
    State(state): State<Arc<AppState>>,
    ApiJson(submission): ApiJson<LeadSubmission>,
) -> Result<(StatusCode, Json<OkResponse>)> {
    let lead = submission
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let record = state.store.create_lead(&lead).await?;

    tracing::info!(lead_id = record.id, source = %record.source, "Lead captured");

    Ok((StatusCode::CREATED, Json(OkResponse { ok: true })))
}

#[derive(Serialize)]
pub struct LeadsResponse {
    pub ok: bool,
    pub leads: Vec<LeadRecord>,
}

/// Most recent leads, newest first.
async fn list_leads(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthAdmin>,
) -> Result<Json<LeadsResponse>> {
    let leads = state.store.list_leads(MAX_LEADS).await?;

    tracing::debug!(admin = %admin.email, count = leads.len(), "Listing leads");

    Ok(Json(LeadsResponse { ok: true, leads }))
}
