//! Spreadsheet-style lead store backed by the Airtable REST API.
//!
//! A dumb sink like the other backends: one POST per save, one GET per list,
//! mapped field names, no awareness of the rest of the chain.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{AuditSubmission, Lead, AUDIT_FORM_SOURCE};
use crate::kernel::BaseLeadStore;

const DEFAULT_BASE_URL: &str = "https://api.airtable.com";

pub struct AirtableLeadStore {
    api_key: String,
    base_id: String,
    table_name: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CreateRecordRequest {
    fields: RecordFields,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct RecordFields {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Email", default)]
    email: String,
    #[serde(rename = "Website", default)]
    website: String,
    #[serde(rename = "Business Type", default)]
    business_type: String,
    #[serde(rename = "Current Challenges", default)]
    current_challenges: String,
    #[serde(rename = "Time Spent Daily", default)]
    time_spent_daily: f64,
    #[serde(rename = "Opt-in Marketing", default)]
    opt_in_marketing: bool,
    #[serde(rename = "Source", default)]
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListRecordsResponse {
    #[serde(default)]
    records: Vec<AirtableRecord>,
}

#[derive(Debug, Deserialize)]
struct AirtableRecord {
    id: String,
    #[serde(rename = "createdTime")]
    created_time: DateTime<Utc>,
    #[serde(default)]
    fields: RecordFields,
}

impl AirtableLeadStore {
    pub fn new(api_key: String, base_id: String, table_name: String) -> Self {
        Self {
            api_key,
            base_id,
            table_name,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (used by tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v0/{}/{}", self.base_url, self.base_id, self.table_name)
    }
}

#[async_trait]
impl BaseLeadStore for AirtableLeadStore {
    fn name(&self) -> &'static str {
        "airtable"
    }

    async fn save(&self, submission: &AuditSubmission) -> Result<bool> {
        let request = CreateRecordRequest {
            fields: RecordFields {
                name: submission.name.clone(),
                email: submission.email.clone(),
                website: submission.website.clone(),
                business_type: submission.business_type.clone(),
                current_challenges: submission.current_challenges.clone(),
                time_spent_daily: submission.time_spent_daily,
                opt_in_marketing: submission.opt_in_marketing,
                source: Some(AUDIT_FORM_SOURCE.to_string()),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send Airtable create request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Airtable API error {}: {}", status, body);
        }

        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Lead>> {
        let response = self
            .client
            .get(self.endpoint())
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Failed to send Airtable list request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Airtable API error {}: {}", status, body);
        }

        let listed: ListRecordsResponse = response
            .json()
            .await
            .context("Failed to parse Airtable list response")?;

        Ok(listed
            .records
            .into_iter()
            .map(|record| Lead {
                id: record.id,
                name: record.fields.name,
                email: record.fields.email,
                website: record.fields.website,
                business_type: record.fields.business_type,
                current_challenges: record.fields.current_challenges,
                time_spent_daily: record.fields.time_spent_daily,
                opt_in_marketing: record.fields.opt_in_marketing,
                timestamp: record.created_time,
                source: record.fields.source,
            })
            .collect())
    }
}
