use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source tag stamped onto every lead persisted by this service.
pub const AUDIT_FORM_SOURCE: &str = "Business Audit Form";

/// One audit-form submission as supplied by the client.
///
/// Every field defaults so an incomplete body reaches the validator (which
/// owns the "All fields are required" response) instead of being rejected by
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub current_challenges: String,
    /// Hours per day lost to manual work.
    #[serde(default)]
    pub time_spent_daily: f64,
    #[serde(default)]
    pub opt_in_marketing: bool,
}

/// One persisted audit lead.
///
/// `id` is assigned by whichever backend accepted the write and is scoped to
/// that backend: a Postgres bigserial id and an Airtable record id live in
/// different id spaces and must never be compared or joined across backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub website: String,
    pub business_type: String,
    pub current_challenges: String,
    pub time_spent_daily: f64,
    #[serde(default)]
    pub opt_in_marketing: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub source: Option<String>,
}

impl Lead {
    /// Build a Lead from a submission with a freshly minted id and timestamp.
    pub fn from_submission(submission: &AuditSubmission, id: String) -> Self {
        Self {
            id,
            name: submission.name.clone(),
            email: submission.email.clone(),
            website: submission.website.clone(),
            business_type: submission.business_type.clone(),
            current_challenges: submission.current_challenges.clone(),
            time_spent_daily: submission.time_spent_daily,
            opt_in_marketing: submission.opt_in_marketing,
            timestamp: Utc::now(),
            source: Some(AUDIT_FORM_SOURCE.to_string()),
        }
    }
}
