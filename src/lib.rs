// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Vignaharta: marketing site backend for a residential real-estate project
//!
//! This crate provides the REST API behind the public site and the admin
//! content editor (content document, lead capture, admin login), plus a
//! typed client used by both front ends.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::StoreHandle;
use middleware::CorsPolicy;
use services::AuthService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: StoreHandle,
    pub auth: AuthService,
    pub cors: CorsPolicy,
}

impl AppState {
    pub fn new(config: Config, store: StoreHandle) -> Self {
        let auth = AuthService::new(&config.jwt_signing_key);
        let cors = CorsPolicy::from_config(&config);
        Self {
            config,
            store,
            auth,
            cors,
        }
    }
}
