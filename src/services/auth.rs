// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin authentication: password login and signed session tokens.
//!
//! Tokens are HS256 JWTs carrying the admin email as `sub` and expire after
//! eight hours. There is no refresh; an expired session logs in again.

use crate::db::Store;
use crate::error::AppError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Session lifetime.
pub const TOKEN_TTL_SECS: usize = 8 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (admin email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub email: String,
}

/// Issues and verifies admin session tokens.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(signing_key: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
        }
    }

    /// Check credentials against the stored hash and issue a token.
    ///
    /// Unknown email and wrong password produce the same error, and both
    /// paths run one password verification.
    pub async fn login(
        &self,
        store: &dyn Store,
        email: &str,
        password: &str,
    ) -> Result<LoginResult, AppError> {
        let email = email.trim();
        let user = store.get_user_by_email(email).await?;

        let (stored_hash, user) = match user {
            Some(user) => (user.password_hash.clone(), Some(user)),
            None => (dummy_hash().to_string(), None),
        };

        let password_ok = verify_password(password, &stored_hash);

        match user {
            Some(user) if password_ok => {
                let token = self.issue_token(&user.email)?;
                tracing::info!(admin_id = user.id, "Admin logged in");
                Ok(LoginResult {
                    token,
                    email: user.email,
                })
            }
            _ => {
                tracing::debug!("Rejected admin login");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Create a session token for `email`.
    pub fn issue_token(&self, email: &str) -> Result<String, AppError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
            .as_secs() as usize;

        let claims = Claims {
            sub: email.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
    }

    /// Validate signature and expiry. Any failure is `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AppError::InvalidToken
            })
    }
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Hash checked when the email is unknown. Never matches a real login.
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("dummy password for unknown accounts").unwrap_or_default())
}
