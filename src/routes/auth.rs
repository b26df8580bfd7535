// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin login and session verification routes.

use crate::error::{AppError, Result};
use crate::middleware::{require_auth, AuthAdmin};
use crate::routes::ApiJson;
use crate::AppState;
use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route(
            "/api/auth/verify",
            get(verify).route_layer(middleware::from_fn_with_state(state, require_auth)),
        )
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
}

/// Exchange email and password for a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = body.email.as_deref().map(str::trim).unwrap_or_default();
    let password = body.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let result = state.auth.login(state.store.as_ref(), email, password).await?;

    Ok(Json(LoginResponse {
        token: result.token,
        email: result.email,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VerifyResponse {
    pub ok: bool,
    pub email: String,
}

/// Confirm the presented token is still valid.
async fn verify(Extension(admin): Extension<AuthAdmin>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        ok: true,
        email: admin.email,
    })
}
