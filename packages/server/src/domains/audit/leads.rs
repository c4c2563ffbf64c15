//! Lead query/export service - the authenticated admin read path.

use anyhow::Context;
use csv::{QuoteStyle, WriterBuilder};

use crate::common::Lead;

use super::error::LeadsError;

/// Fixed CSV column order. Changing this breaks downstream imports.
pub const CSV_COLUMNS: [&str; 10] = [
    "ID",
    "Name",
    "Email",
    "Website",
    "Business Type",
    "Time Spent Daily",
    "Current Challenges",
    "Opt-in Marketing",
    "Timestamp",
    "Source",
];

/// Filename offered in the Content-Disposition header.
pub const CSV_FILENAME: &str = "audit-leads.csv";

/// Serialize leads to CSV with a header row. Every field is quoted; embedded
/// quotes are doubled by the writer. Zero leads is NotFound, never an empty
/// 200 body.
pub fn export_csv(leads: &[Lead]) -> Result<String, LeadsError> {
    if leads.is_empty() {
        return Err(LeadsError::NotFound);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(CSV_COLUMNS)
        .context("Failed to write CSV header")
        .map_err(LeadsError::Internal)?;

    for lead in leads {
        let hours = format_hours(lead.time_spent_daily);
        let timestamp = lead.timestamp.to_rfc3339();
        writer
            .write_record([
                lead.id.as_str(),
                lead.name.as_str(),
                lead.email.as_str(),
                lead.website.as_str(),
                lead.business_type.as_str(),
                hours.as_str(),
                lead.current_challenges.as_str(),
                if lead.opt_in_marketing { "true" } else { "false" },
                timestamp.as_str(),
                lead.source.as_deref().unwrap_or(""),
            ])
            .context("Failed to write CSV row")
            .map_err(LeadsError::Internal)?;
    }

    let bytes = writer
        .into_inner()
        .context("Failed to flush CSV writer")
        .map_err(|e| LeadsError::Internal(e.into()))?;

    String::from_utf8(bytes)
        .context("CSV output was not valid UTF-8")
        .map_err(LeadsError::Internal)
}

/// Whole hours print without a trailing ".0" ("5", not "5.0").
fn format_hours(hours: f64) -> String {
    format!("{}", hours)
}

/// Human message for the list endpoint.
pub fn list_message(count: usize) -> String {
    if count == 0 {
        "No leads found yet".to_string()
    } else {
        format!("Found {} audit leads", count)
    }
}
