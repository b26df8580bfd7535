// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Site content routes.
//!
//! The document is opaque to the server beyond being a JSON object: a PUT
//! replaces it wholesale and the last write wins.

use crate::error::{AppError, Result};
use crate::middleware::{require_auth, AuthAdmin};
use crate::routes::ApiJson;
use crate::time_utils::format_http_date;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/content",
        get(get_content)
            .merge(put(save_content).route_layer(middleware::from_fn_with_state(state, require_auth))),
    )
}

/// Return the current content document.
async fn get_content(State(state): State<Arc<AppState>>) -> Result<Response> {
    let stored = state
        .store
        .get_content()
        .await?
        .ok_or(AppError::NotInitialized)?;

    let mut response = Json(stored.document).into_response();
    if let Ok(value) = HeaderValue::from_str(&format_http_date(stored.updated_at)) {
        response.headers_mut().insert(header::LAST_MODIFIED, value);
    }
    Ok(response)
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Replace the whole content document.
async fn save_content(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthAdmin>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<OkResponse>> {
    let Value::Object(document) = body else {
        return Err(AppError::BadRequest("Invalid content payload".to_string()));
    };

    let updated_at = state.store.save_content(&document).await?;

    tracing::info!(
        admin = %admin.email,
        updated_at = %updated_at,
        "Content document replaced"
    );

    Ok(Json(OkResponse { ok: true }))
}
