// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cross-origin, health and response header tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use vignaharta_backend::config::{Config, Environment};

mod common;
use common::{body_json, create_test_app, create_test_app_with, get_request, send, ALLOWED_ORIGIN};

fn with_origin(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = create_test_app().await;

    let response = send(&app, get_request("/api/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["service"], "vignaharta-backend");
    assert_eq!(body["database"], "sqlite");
    assert!(body["build_id"].is_string());
}

#[tokio::test]
async fn test_index() {
    let (app, _) = create_test_app().await;

    let response = send(&app, get_request("/", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "ok": true, "message": "Vignaharta backend is running", "health": "/api/health" })
    );
}

#[tokio::test]
async fn test_no_origin_always_allowed() {
    let (app, _) = create_test_app().await;

    let response = send(&app, get_request("/api/content", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_allowed_origin_gets_cors_headers() {
    let (app, _) = create_test_app().await;

    let response = send(&app, with_origin("/api/content", ALLOWED_ORIGIN)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn test_disallowed_origin_forbidden() {
    let (app, _) = create_test_app().await;

    let response = send(&app, with_origin("/api/content", "https://evil.example.com")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "forbidden");
}

#[tokio::test]
async fn test_preflight_for_allowed_origin() {
    let (app, _) = create_test_app().await;

    let response = send(
        &app,
        Request::builder()
            .method("OPTIONS")
            .uri("/api/content")
            .header(header::ORIGIN, ALLOWED_ORIGIN)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ALLOWED_ORIGIN
    );
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("PUT"));
    let allowed_headers = headers
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed_headers.contains("authorization"));
    assert!(allowed_headers.contains("content-type"));
}

#[tokio::test]
async fn test_dev_origins_only_outside_production() {
    let (dev_app, _) = create_test_app().await;
    let response = send(&dev_app, with_origin("/api/health", "http://localhost:5173")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let config = Config {
        environment: Environment::Production,
        ..Config::test_default()
    };
    let (prod_app, _) = create_test_app_with(config).await;
    let response = send(&prod_app, with_origin("/api/health", "http://localhost:5173")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&prod_app, with_origin("/api/health", ALLOWED_ORIGIN)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_wildcard_origin_entry() {
    let config = Config {
        environment: Environment::Production,
        allowed_origins: vec!["*.vercel.app".to_string()],
        ..Config::test_default()
    };
    let (app, _) = create_test_app_with(config).await;

    let response = send(&app, with_origin("/api/health", "https://preview-123.vercel.app")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, with_origin("/api/health", "https://vercel.app.evil.com")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_security_headers_present() {
    let (app, _) = create_test_app().await;

    let response = send(&app, get_request("/api/health", None)).await;
    let headers = response.headers();

    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
}
