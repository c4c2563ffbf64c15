use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// Only the port is hard-required at startup. Every external credential is
/// optional here; the pipeline degrades per-component when one is absent
/// (a missing Gemini key becomes a 503 at request time, a missing Resend key
/// becomes a deferred-email response, missing storage credentials shorten
/// the persistence fallback chain).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub resend_api_key: Option<String>,
    pub database_url: Option<String>,
    pub airtable_api_key: Option<String>,
    pub airtable_base_id: Option<String>,
    pub airtable_table_name: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub leads_api_key: Option<String>,
    pub leads_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|v| !v.is_empty()),
            resend_api_key: env::var("RESEND_API_KEY").ok().filter(|v| !v.is_empty()),
            // Managed Postgres providers expose either name
            database_url: env::var("POSTGRES_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .ok()
                .filter(|v| !v.is_empty()),
            airtable_api_key: env::var("AIRTABLE_API_KEY").ok().filter(|v| !v.is_empty()),
            airtable_base_id: env::var("AIRTABLE_BASE_ID").ok().filter(|v| !v.is_empty()),
            airtable_table_name: env::var("AIRTABLE_TABLE_NAME")
                .ok()
                .filter(|v| !v.is_empty()),
            slack_webhook_url: env::var("SLACK_WEBHOOK_URL").ok().filter(|v| !v.is_empty()),
            leads_api_key: env::var("LEADS_API_KEY").ok().filter(|v| !v.is_empty()),
            leads_file: env::var("LEADS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/audit-leads.json")),
        })
    }
}

/// Detect API keys that were never replaced after copying an env template.
/// Such keys are treated as absent so the pipeline takes the deferred path
/// instead of burning a request on a guaranteed 401.
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    let lowered = key.to_lowercase();
    key.is_empty() || lowered.contains("placeholder") || lowered.contains("your_")
}
