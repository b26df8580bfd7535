// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use vignaharta_backend::config::Config;
use vignaharta_backend::db::{self, SqliteStore, StoreHandle, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};
use vignaharta_backend::routes::create_router;
use vignaharta_backend::AppState;

pub const ALLOWED_ORIGIN: &str = "https://vignaharta.example";

/// Check if a Postgres test database is configured.
pub fn postgres_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Skip test with message if no Postgres test database is configured.
#[macro_export]
macro_rules! require_postgres {
    () => {
        match crate::common::postgres_url() {
            Some(url) => url,
            None => {
                eprintln!("⚠️  Skipping: TEST_DATABASE_URL not set");
                return;
            }
        }
    };
}

/// Seeded in-memory store.
pub async fn test_store() -> StoreHandle {
    let store = SqliteStore::in_memory()
        .await
        .expect("Failed to open in-memory SQLite");
    db::prepare(&store).await.expect("Failed to prepare store");
    Arc::new(store)
}

/// Create a test app backed by a fresh in-memory database.
/// Returns the router and the shared state.
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default()).await
}

pub async fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, test_store().await));
    (create_router(state.clone()), state)
}

/// Serve the router on an ephemeral local port. Returns the base URL.
pub async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}", addr)
}

/// Send a request through the router.
pub async fn send(app: &axum::Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in as the seeded admin and return the token.
pub async fn login_token(app: &axum::Router) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            &serde_json::json!({
                "email": DEFAULT_ADMIN_EMAIL,
                "password": DEFAULT_ADMIN_PASSWORD,
            }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    body_json(response).await["token"]
        .as_str()
        .expect("login response has no token")
        .to_string()
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: usize,
    iat: usize,
}

fn now_secs() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

/// Sign a token with arbitrary lifetime offsets (seconds relative to now).
pub fn create_jwt(email: &str, signing_key: &[u8], iat_offset: i64, exp_offset: i64) -> String {
    let now = now_secs() as i64;
    let claims = TestClaims {
        sub: email.to_string(),
        iat: (now + iat_offset) as usize,
        exp: (now + exp_offset) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// Token whose expiry passed two hours ago.
pub fn create_expired_jwt(email: &str, signing_key: &[u8]) -> String {
    create_jwt(email, signing_key, -10 * 3600, -2 * 3600)
}
