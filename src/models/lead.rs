// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lead (contact-form submission) model and input validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::ValidateEmail;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_NOTES_LEN: usize = 1000;
pub const PHONE_DIGITS: usize = 10;

/// Which site form produced the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    /// General "Enquire Now" form
    EnquireNow,
    /// Floor-plan price sheet request
    PriceSheet,
    /// Project brochure download
    BrochureDownload,
}

impl LeadSource {
    pub const ALL: [LeadSource; 3] = [
        LeadSource::EnquireNow,
        LeadSource::PriceSheet,
        LeadSource::BrochureDownload,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadSource::EnquireNow => "enquire_now",
            LeadSource::PriceSheet => "price_sheet",
            LeadSource::BrochureDownload => "brochure_download",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadSource {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or(LeadError::InvalidSource)
    }
}

/// Lead validation failures. Messages name the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("Name is required")]
    MissingName,
    #[error("Name must be at most {MAX_NAME_LEN} characters")]
    NameTooLong,
    #[error("Phone is required")]
    MissingPhone,
    #[error("Phone must be exactly {PHONE_DIGITS} digits")]
    InvalidPhone,
    #[error("Email must be a valid email address")]
    InvalidEmail,
    #[error("Source is required")]
    MissingSource,
    #[error("Source must be one of enquire_now, price_sheet, brochure_download")]
    InvalidSource,
    #[error("Notes must be at most {MAX_NOTES_LEN} characters")]
    NotesTooLong,
}

/// Raw lead form body as posted by the public site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A validated lead ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    /// Empty when not supplied
    pub email: String,
    pub source: LeadSource,
    /// Empty when not supplied
    pub notes: String,
}

fn trimmed(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or_default()
}

fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

impl LeadSubmission {
    /// Validate and normalise the submission.
    ///
    /// String fields are trimmed before checking; absent optional fields
    /// become empty strings.
    pub fn validate(&self) -> Result<NewLead, LeadError> {
        let name = trimmed(self.name.as_deref());
        if name.is_empty() {
            return Err(LeadError::MissingName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(LeadError::NameTooLong);
        }

        let phone = trimmed(self.phone.as_deref());
        if phone.is_empty() {
            return Err(LeadError::MissingPhone);
        }
        if !is_valid_phone(phone) {
            return Err(LeadError::InvalidPhone);
        }

        let email = trimmed(self.email.as_deref()).to_string();
        if !email.is_empty() && (email.len() > MAX_EMAIL_LEN || !email.validate_email()) {
            return Err(LeadError::InvalidEmail);
        }

        let source = trimmed(self.source.as_deref());
        if source.is_empty() {
            return Err(LeadError::MissingSource);
        }
        let source: LeadSource = source.parse()?;

        let notes = trimmed(self.notes.as_deref());
        if notes.chars().count() > MAX_NOTES_LEN {
            return Err(LeadError::NotesTooLong);
        }

        Ok(NewLead {
            name: name.to_string(),
            phone: phone.to_string(),
            email,
            source,
            notes: notes.to_string(),
        })
    }
}

/// Stored lead as returned to the admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeadRecord {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub source: LeadSource,
    pub notes: String,
    /// RFC3339 UTC timestamp assigned by the server
    pub created_at: String,
}
