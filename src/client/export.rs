// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV export of the admin leads list.

use super::ClientError;
use crate::models::LeadRecord;
use crate::time_utils::format_day;
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const CSV_HEADERS: [&str; 7] = ["id", "name", "phone", "email", "source", "notes", "created_at"];

/// Render leads as CSV. Fields are quoted only when they contain a comma,
/// a quote or a newline.
pub fn leads_to_csv(leads: &[LeadRecord]) -> Result<String, ClientError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let export_err = |e: csv::Error| ClientError::Export(e.to_string());

    writer.write_record(CSV_HEADERS).map_err(export_err)?;
    for lead in leads {
        let id = lead.id.to_string();
        writer
            .write_record([
                id.as_str(),
                lead.name.as_str(),
                lead.phone.as_str(),
                lead.email.as_str(),
                lead.source.as_str(),
                lead.notes.as_str(),
                lead.created_at.as_str(),
            ])
            .map_err(export_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ClientError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ClientError::Export(e.to_string()))
}

/// `vignaharta_leads_<YYYY-MM-DD>.csv`
pub fn export_filename(day: NaiveDate) -> String {
    format!("vignaharta_leads_{}.csv", format_day(day))
}
