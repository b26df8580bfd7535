// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin editor session.
//!
//! Holds the bearer token in a [`TokenStore`], the draft content document
//! being edited, and the leads tab cache. Any 401 from the API discards the
//! token and drops back to [`SessionState::LoggedOut`]; there is no refresh.

use super::{leads_to_csv, ApiClient, ClientError, ContentLoader};
use crate::models::{default_content, AppContent, LeadRecord};
use std::sync::Mutex;

/// Session-lifetime storage for the admin bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token kept in process memory only; gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot().clone()
    }

    fn save(&self, token: &str) {
        *self.slot() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot() = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    LoggedOut,
    Authenticated { email: String, draft: AppContent },
}

pub struct AdminSession<T: TokenStore> {
    api: ApiClient,
    loader: ContentLoader,
    tokens: T,
    state: SessionState,
    /// `None` until the leads tab is first opened
    leads: Option<Vec<LeadRecord>>,
    /// Set when the stored document could not be read and the draft
    /// started from the default content instead
    advisory: Option<String>,
}

impl<T: TokenStore> AdminSession<T> {
    pub fn new(api: ApiClient, tokens: T) -> Self {
        Self {
            loader: ContentLoader::new(api.clone()),
            api,
            tokens,
            state: SessionState::LoggedOut,
            leads: None,
            advisory: None,
        }
    }

    pub fn with_loader(mut self, loader: ContentLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn email(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { email, .. } => Some(email),
            SessionState::LoggedOut => None,
        }
    }

    pub fn draft(&self) -> Option<&AppContent> {
        match &self.state {
            SessionState::Authenticated { draft, .. } => Some(draft),
            SessionState::LoggedOut => None,
        }
    }

    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    /// Notice to show in the editor when the draft is not the stored document.
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    /// Current document as the starting draft.
    ///
    /// A stored document that does not decode yields the default content and
    /// sets [`advisory`](Self::advisory); saving replaces the stored copy.
    async fn load_draft(&mut self) -> Result<AppContent, ClientError> {
        match self.loader.fetch().await {
            Ok(draft) => {
                self.advisory = None;
                Ok(draft)
            }
            Err(ClientError::Decode(reason)) => {
                tracing::warn!(error = %reason, "Stored content unreadable, editing default content");
                self.advisory = Some(format!(
                    "The saved site content could not be read ({}). Editing the default content; saving replaces the saved copy.",
                    reason
                ));
                Ok(default_content())
            }
            Err(e) => Err(e),
        }
    }

    /// Resume a stored session on startup.
    ///
    /// A stored token that fails verification for any reason is discarded.
    pub async fn bootstrap(&mut self) -> Result<(), ClientError> {
        let Some(token) = self.tokens.load() else {
            self.state = SessionState::LoggedOut;
            return Ok(());
        };

        match self.api.verify_token(&token).await {
            Ok(email) => {
                let draft = self.load_draft().await?;
                self.state = SessionState::Authenticated { email, draft };
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Discarding stored admin token");
                self.expire();
                Ok(())
            }
        }
    }

    /// Log in and load the current document as the draft.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let session = self.api.login(email, password).await?;
        self.tokens.save(&session.token);

        let draft = match self.load_draft().await {
            Ok(draft) => draft,
            Err(e) => {
                self.tokens.clear();
                return Err(e);
            }
        };

        self.leads = None;
        self.state = SessionState::Authenticated {
            email: session.email,
            draft,
        };
        Ok(())
    }

    /// Replace the draft with `edit(draft)`. Nothing is sent until [`save`](Self::save).
    pub fn edit(&mut self, edit: impl FnOnce(&AppContent) -> AppContent) -> Result<(), ClientError> {
        match &mut self.state {
            SessionState::Authenticated { draft, .. } => {
                *draft = edit(draft);
                Ok(())
            }
            SessionState::LoggedOut => Err(ClientError::NotAuthenticated),
        }
    }

    /// Send the whole draft, replacing the stored document.
    pub async fn save(&mut self) -> Result<(), ClientError> {
        let draft = self.draft().cloned().ok_or(ClientError::NotAuthenticated)?;
        let token = self.require_token()?;

        match self.api.save_content(&draft, &token).await {
            Ok(()) => {
                self.advisory = None;
                Ok(())
            }
            Err(e) if e.is_unauthorized() => {
                self.expire();
                Err(ClientError::SessionExpired)
            }
            Err(e) => Err(e),
        }
    }

    /// Show the leads tab, fetching only on first activation.
    pub async fn open_leads(&mut self) -> Result<&[LeadRecord], ClientError> {
        if self.leads.is_none() {
            self.refresh_leads().await?;
        }
        Ok(self.leads())
    }

    /// Re-fetch the leads list.
    pub async fn refresh_leads(&mut self) -> Result<&[LeadRecord], ClientError> {
        if !self.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        let token = self.require_token()?;

        match self.api.get_leads(&token).await {
            Ok(leads) => {
                self.leads = Some(leads);
                Ok(self.leads())
            }
            Err(e) if e.is_unauthorized() => {
                self.expire();
                Err(ClientError::SessionExpired)
            }
            Err(e) => Err(e),
        }
    }

    /// Cached leads; empty before the tab is opened.
    pub fn leads(&self) -> &[LeadRecord] {
        self.leads.as_deref().unwrap_or_default()
    }

    /// CSV of the currently shown leads.
    pub fn export_leads_csv(&self) -> Result<String, ClientError> {
        leads_to_csv(self.leads())
    }

    pub fn logout(&mut self) {
        self.expire();
    }

    fn require_token(&mut self) -> Result<String, ClientError> {
        match self.tokens.load() {
            Some(token) => Ok(token),
            None => {
                self.expire();
                Err(ClientError::SessionExpired)
            }
        }
    }

    fn expire(&mut self) {
        self.tokens.clear();
        self.state = SessionState::LoggedOut;
        self.leads = None;
        self.advisory = None;
    }
}
