// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod content;
pub mod lead;
pub mod user;

pub use content::{default_content, AppContent};
pub use lead::{LeadError, LeadRecord, LeadSource, LeadSubmission, NewLead};
pub use user::AdminUser;
