// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT compatibility tests.
//!
//! These tests verify that tokens issued by the auth service carry the claim
//! layout the middleware and the admin client expect, and that tokens built
//! independently with the same layout verify.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use vignaharta_backend::services::auth::{AuthService, TOKEN_TTL_SECS};

/// Claims structure that must match what the middleware expects.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

#[test]
fn test_issued_token_decodes_with_expected_claims() {
    let auth = AuthService::new(SIGNING_KEY);
    let token = auth.issue_token("admin@gmail.com").unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.header.alg, Algorithm::HS256);
    assert_eq!(token_data.claims.sub, "admin@gmail.com");
    assert_eq!(token_data.claims.exp - token_data.claims.iat, 8 * 60 * 60);
    assert_eq!(TOKEN_TTL_SECS, 8 * 60 * 60);
}

#[test]
fn test_independently_built_token_verifies() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    let claims = Claims {
        sub: "admin@gmail.com".to_string(),
        exp: now + 3600,
        iat: now,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    let verified = AuthService::new(SIGNING_KEY).verify(&token).unwrap();
    assert_eq!(verified.sub, "admin@gmail.com");
}

#[test]
fn test_other_algorithm_rejected() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    let claims = Claims {
        sub: "admin@gmail.com".to_string(),
        exp: now + 3600,
        iat: now,
    };
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert!(AuthService::new(SIGNING_KEY).verify(&token).is_err());
}

#[test]
fn test_tampered_payload_rejected() {
    let auth = AuthService::new(SIGNING_KEY);
    let token = auth.issue_token("admin@gmail.com").unwrap();

    let mut parts: Vec<String> = token.split('.').map(String::from).collect();
    let other = auth.issue_token("intruder@example.com").unwrap();
    parts[1] = other.split('.').nth(1).unwrap().to_string();
    // Original signature over a different payload
    let forged = parts.join(".");

    assert!(auth.verify(&forged).is_err());
}
