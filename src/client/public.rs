// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public site client: content loading with fallback and lead forms.

use super::{ApiClient, ClientError};
use crate::models::{default_content, AppContent, LeadError, LeadSource, LeadSubmission, NewLead};
use std::time::Duration;

/// Extra attempts after the first failed content fetch.
pub const CONTENT_RETRIES: u32 = 2;

/// Base backoff; attempt `n` waits `RETRY_BACKOFF * (n + 1)`.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(500);

const BROCHURE_FILENAME: &str = "Vignaharta_Infinity_Brochure.txt";

const ADVISORY: &str = "Live content is unavailable right now. Showing the default site content.";

/// Where the loaded content came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Live,
    Fallback { reason: String },
}

#[derive(Debug, Clone)]
pub struct LoadedContent {
    pub content: AppContent,
    pub source: ContentSource,
}

impl LoadedContent {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ContentSource::Fallback { .. })
    }

    /// Non-blocking notice for visitors when the default document is shown.
    pub fn advisory(&self) -> Option<&'static str> {
        self.is_fallback().then_some(ADVISORY)
    }
}

/// Fetches the content document with bounded retries.
#[derive(Clone)]
pub struct ContentLoader {
    api: ApiClient,
    retries: u32,
    backoff: Duration,
}

impl ContentLoader {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            retries: CONTENT_RETRIES,
            backoff: RETRY_BACKOFF,
        }
    }

    pub fn with_retry(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.backoff = backoff;
        self
    }

    /// Try up to `retries + 1` times, returning the last error. Only
    /// transient failures are retried.
    pub async fn fetch(&self) -> Result<AppContent, ClientError> {
        let mut attempt = 0;
        loop {
            match self.api.get_content().await {
                Ok(content) => return Ok(content),
                Err(e) if attempt < self.retries && e.is_transient() => {
                    tracing::debug!(attempt, error = %e, "Content fetch failed, retrying");
                    tokio::time::sleep(self.backoff * (attempt + 1)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Never fails: falls back to the bundled default document.
    pub async fn load(&self) -> LoadedContent {
        match self.fetch().await {
            Ok(content) => LoadedContent {
                content,
                source: ContentSource::Live,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Using default content");
                LoadedContent {
                    content: default_content(),
                    source: ContentSource::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }
}

/// Plain-text file handed to the visitor after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub text: String,
}

/// A unit configuration offered on the floor plans section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorPlan {
    /// Short configuration code, e.g. "2bhk"
    pub configuration: &'static str,
    pub label: &'static str,
    /// Square feet
    pub carpet_area: &'static str,
    pub price: &'static str,
}

pub const FLOOR_PLANS: [FloorPlan; 3] = [
    FloorPlan {
        configuration: "1bhk",
        label: "ROYAL SUITE",
        carpet_area: "450",
        price: "₹ 75.00 Lacs*",
    },
    FloorPlan {
        configuration: "2bhk",
        label: "IMPERIAL SUITE",
        carpet_area: "720",
        price: "₹ 1.15 Cr*",
    },
    FloorPlan {
        configuration: "3bhk",
        label: "PRESIDENTIAL SUITE",
        carpet_area: "1050",
        price: "₹ 1.85 Cr*",
    },
];

impl FloorPlan {
    pub fn find(configuration: &str) -> Option<&'static FloorPlan> {
        FLOOR_PLANS
            .iter()
            .find(|plan| plan.configuration.eq_ignore_ascii_case(configuration))
    }

    pub fn code(&self) -> String {
        self.configuration.to_ascii_uppercase()
    }

    pub fn price_sheet_filename(&self) -> String {
        format!("Vignaharta_Price_Sheet_{}.txt", self.code())
    }

    pub fn price_sheet_download(&self, project_name: &str, visitor_name: &str, phone: &str) -> Download {
        Download {
            filename: self.price_sheet_filename(),
            text: self.price_sheet_text(project_name, visitor_name, phone),
        }
    }

    /// Plain-text price sheet handed to the visitor after submission.
    pub fn price_sheet_text(&self, project_name: &str, visitor_name: &str, phone: &str) -> String {
        format!(
            "{} - PRICE SHEET\n\n---------------------------------\n\n\
             Plan Type: {}\nConfiguration: {}\nCarpet Area: {} sq.ft\nStarting Price: {}\n\n\
             ---------------------------------\n\n\
             Thank you for your interest, {}!\n\
             Our sales team will contact you shortly at {}.",
            project_name.to_uppercase(),
            self.label,
            self.code(),
            self.carpet_area,
            self.price,
            visitor_name,
            phone
        )
    }
}

pub fn brochure_download(content: &AppContent, visitor_name: &str) -> Download {
    Download {
        filename: BROCHURE_FILENAME.to_string(),
        text: brochure_text(content, visitor_name),
    }
}

/// Plain-text brochure built from the current about section.
pub fn brochure_text(content: &AppContent, visitor_name: &str) -> String {
    format!(
        "{} - OFFICIAL BROCHURE\n\n---------------------------------\n\n\
         Project: {}\n\nDescription:\n{}\n\n\
         Highlights:\n- Prime Avenue Location\n- Expansive Sun Decks\n- Neo-Classical Design\n- 3-Tier Security\n\n\
         ---------------------------------\n\n\
         Thank you for downloading, {}!\nFor more details, visit our sales office.",
        content.hero.project_name.to_uppercase(),
        content.about.title,
        content.about.description,
        visitor_name
    )
}

/// One of the three lead-capture forms on the public site.
#[derive(Debug, Clone)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    source: LeadSource,
    notes: Option<String>,
    email_required: bool,
}

impl LeadForm {
    /// General "enquire now" form; email optional.
    pub fn enquiry(name: &str, phone: &str, email: &str) -> Self {
        Self::new(name, phone, email, LeadSource::EnquireNow)
    }

    /// Brochure download; asks for an email to send follow-ups to.
    pub fn brochure(name: &str, phone: &str, email: &str) -> Self {
        Self {
            email_required: true,
            ..Self::new(name, phone, email, LeadSource::BrochureDownload)
        }
    }

    /// Price sheet request for one floor plan.
    pub fn price_sheet(name: &str, phone: &str, email: &str, plan: &FloorPlan) -> Self {
        Self {
            notes: Some(format!("Plan:{}", plan.code())),
            ..Self::new(name, phone, email, LeadSource::PriceSheet)
        }
    }

    fn new(name: &str, phone: &str, email: &str, source: LeadSource) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            source,
            notes: None,
            email_required: false,
        }
    }

    pub fn source(&self) -> LeadSource {
        self.source
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Request body for `POST /api/leads`.
    pub fn submission(&self) -> LeadSubmission {
        let email = self.email.trim();
        LeadSubmission {
            name: Some(self.name.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
            email: (!email.is_empty()).then(|| email.to_string()),
            source: Some(self.source.to_string()),
            notes: self.notes.clone(),
        }
    }

    /// Same rules the API applies, checked before any request is sent.
    pub fn validate(&self) -> Result<NewLead, LeadError> {
        if self.email_required && self.email.trim().is_empty() {
            return Err(LeadError::InvalidEmail);
        }
        self.submission().validate()
    }
}

/// Everything the public single-page site needs from the API.
#[derive(Clone)]
pub struct PublicSite {
    api: ApiClient,
    loader: ContentLoader,
}

impl PublicSite {
    pub fn new(api: ApiClient) -> Self {
        Self {
            loader: ContentLoader::new(api.clone()),
            api,
        }
    }

    pub fn with_loader(api: ApiClient, loader: ContentLoader) -> Self {
        Self { api, loader }
    }

    /// Load once at startup.
    pub async fn load_content(&self) -> LoadedContent {
        self.loader.load().await
    }

    /// Validate locally, then submit once. Errors are returned to the visitor.
    pub async fn submit(&self, form: &LeadForm) -> Result<(), ClientError> {
        form.validate()?;
        self.api.submit_lead(&form.submission()).await
    }
}
