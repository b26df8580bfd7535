// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cross-origin allow-list.
//!
//! Requests without an `Origin` header (server-to-server, curl) are always
//! let through. Browser requests must come from a configured origin, or from
//! a local dev server when not running in production.

use crate::config::Config;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Local dev servers accepted outside production.
pub const DEV_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

/// Which browser origins may call the API.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    exact: Vec<String>,
    /// Domains from `*.domain` entries; any https subdomain matches.
    wildcard_domains: Vec<String>,
}

impl CorsPolicy {
    pub fn from_config(config: &Config) -> Self {
        let mut policy = Self::default();
        for entry in &config.allowed_origins {
            match entry.strip_prefix("*.") {
                Some(domain) => policy.wildcard_domains.push(domain.to_ascii_lowercase()),
                None => policy.exact.push(entry.clone()),
            }
        }
        if !config.environment.is_production() {
            policy
                .exact
                .extend(DEV_ORIGINS.iter().map(|o| o.to_string()));
        }
        policy
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        if self.exact.iter().any(|o| o == origin) {
            return true;
        }

        let Some(host) = origin.strip_prefix("https://") else {
            return false;
        };
        if host.contains(['/', '@']) {
            return false;
        }
        let host = host.to_ascii_lowercase();
        self.wildcard_domains.iter().any(|domain| {
            host.strip_suffix(domain.as_str())
                .and_then(|prefix| prefix.strip_suffix('.'))
                .is_some_and(|sub| !sub.is_empty())
        })
    }

    /// CORS response headers for allowed origins.
    pub fn layer(&self) -> CorsLayer {
        let policy = self.clone();
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _request_parts: &axum::http::request::Parts| {
                    origin.to_str().is_ok_and(|o| policy.is_allowed(o))
                },
            ))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
    }
}

/// Reject requests that carry an `Origin` outside the allow-list.
pub async fn reject_disallowed_origin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();
        if !state.cors.is_allowed(origin) {
            return Err(AppError::Forbidden(origin.to_string()));
        }
    }

    Ok(next.run(request).await)
}
