// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed API client used by the public site and the admin editor.
//!
//! Every call is bounded by a request timeout. Only content loading retries
//! (see [`public::ContentLoader`]); login, save and lead submission fail
//! immediately and surface the error.

pub mod admin;
pub mod export;
pub mod public;

pub use admin::{AdminSession, MemoryTokenStore, SessionState, TokenStore};
pub use export::{export_filename, leads_to_csv};
pub use public::{ContentLoader, ContentSource, LeadForm, LoadedContent, PublicSite};

use crate::models::{AppContent, LeadError, LeadRecord, LeadSubmission};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Client-side failures.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API unreachable: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("{0}")]
    InvalidLead(#[from] LeadError),

    #[error("Session expired. Please login again.")]
    SessionExpired,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("CSV export failed: {0}")]
    Export(String),
}

impl ClientError {
    /// The API refused the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Status { status: 401, .. })
    }

    /// Worth another attempt: the request may succeed later unchanged.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Timeout(_) | ClientError::Network(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Token returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
}

#[derive(Deserialize)]
struct VerifyBody {
    email: String,
}

#[derive(Deserialize)]
struct LeadsBody {
    leads: Vec<LeadRecord>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the site API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed building HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the content document once.
    pub async fn get_content(&self) -> Result<AppContent, ClientError> {
        self.send_json(self.http.get(self.url("/api/content"))).await
    }

    /// Replace the content document.
    pub async fn save_content(&self, content: &AppContent, token: &str) -> Result<(), ClientError> {
        let request = self
            .http
            .put(self.url("/api/content"))
            .bearer_auth(token)
            .json(content);
        self.send(request).await.map(|_| ())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.send_json(self.http.post(self.url("/api/auth/login")).json(&body))
            .await
    }

    /// Returns the admin email the token belongs to.
    pub async fn verify_token(&self, token: &str) -> Result<String, ClientError> {
        let body: VerifyBody = self
            .send_json(self.http.get(self.url("/api/auth/verify")).bearer_auth(token))
            .await?;
        Ok(body.email)
    }

    pub async fn submit_lead(&self, submission: &LeadSubmission) -> Result<(), ClientError> {
        self.send(self.http.post(self.url("/api/leads")).json(submission))
            .await
            .map(|_| ())
    }

    pub async fn get_leads(&self, token: &str) -> Result<Vec<LeadRecord>, ClientError> {
        let body: LeadsBody = self
            .send_json(self.http.get(self.url("/api/leads")).bearer_auth(token))
            .await?;
        Ok(body.leads)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(self.timeout)
                } else {
                    ClientError::Decode(e.to_string())
                }
            })
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Prefer the API's JSON `message`, then the raw body, then the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message;
    }
    if body.trim().is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        body.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_message() {
        assert_eq!(
            error_message(
                StatusCode::BAD_REQUEST,
                r#"{"error":"bad_request","message":"Phone must be exactly 10 digits"}"#
            ),
            "Phone must be exactly 10 digits"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "HTTP 502");
    }

    #[test]
    fn test_only_transient_errors_retry() {
        assert!(ClientError::Timeout(DEFAULT_TIMEOUT).is_transient());
        assert!(ClientError::Network("refused".to_string()).is_transient());
        assert!(ClientError::Status { status: 503, message: String::new() }.is_transient());
        assert!(!ClientError::Status { status: 401, message: String::new() }.is_transient());
        assert!(!ClientError::Decode("missing field".to_string()).is_transient());
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let api = ApiClient::new("http://localhost:4000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:4000");
        assert_eq!(api.url("/api/content"), "http://localhost:4000/api/content");
    }
}
