// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use vignaharta_backend::error::AppError;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_client_errors_keep_their_message() {
    let (status, body) = render(AppError::BadRequest("Phone is required".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Phone is required");

    let (status, body) = render(AppError::PayloadTooLarge).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "payload_too_large");
}

#[tokio::test]
async fn test_auth_errors_are_401() {
    for err in [
        AppError::Unauthorized,
        AppError::InvalidToken,
        AppError::InvalidCredentials,
    ] {
        let (status, _) = render(err).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_internal_detail_not_leaked() {
    let (status, body) = render(AppError::Database(
        "no such table: leads (SELECT id FROM leads)".to_string(),
    ))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert!(!body.to_string().contains("leads"));

    let (status, body) = render(AppError::Internal(anyhow::anyhow!("secret path /etc/x"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains("/etc/x"));
}

#[tokio::test]
async fn test_forbidden_origin_not_echoed() {
    let (status, body) = render(AppError::Forbidden("https://evil.example".to_string())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Origin not allowed");
}
