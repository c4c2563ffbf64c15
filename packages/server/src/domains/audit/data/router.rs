//! Ordered fallback chain over the configured lead stores.
//!
//! Writes stop at the first backend that accepts; reads return the first
//! backend that answers at all. Neither operation ever propagates a backend
//! error to the caller.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::common::{AuditSubmission, Lead};
use crate::config::Config;
use crate::kernel::BaseLeadStore;

use super::airtable::AirtableLeadStore;
use super::file::FileLeadStore;
use super::postgres::PostgresLeadStore;

pub struct LeadRouter {
    stores: Vec<Arc<dyn BaseLeadStore>>,
}

impl LeadRouter {
    pub fn new(stores: Vec<Arc<dyn BaseLeadStore>>) -> Self {
        Self { stores }
    }

    /// Assemble the chain from configuration: postgres and airtable only when
    /// their credentials are present, the local file backstop always.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut stores: Vec<Arc<dyn BaseLeadStore>> = Vec::new();

        if let Some(url) = &config.database_url {
            stores.push(Arc::new(PostgresLeadStore::connect(
                url,
                config.slack_webhook_url.clone(),
            )?));
        }

        if let (Some(api_key), Some(base_id), Some(table_name)) = (
            &config.airtable_api_key,
            &config.airtable_base_id,
            &config.airtable_table_name,
        ) {
            stores.push(Arc::new(AirtableLeadStore::new(
                api_key.clone(),
                base_id.clone(),
                table_name.clone(),
            )));
        }

        stores.push(Arc::new(FileLeadStore::new(config.leads_file.clone())));

        info!(
            backends = ?stores.iter().map(|s| s.name()).collect::<Vec<_>>(),
            "Lead persistence chain assembled"
        );

        Ok(Self::new(stores))
    }

    /// Backend names in fallback order, for the health endpoint.
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.stores.iter().map(|s| s.name()).collect()
    }

    /// Persist a lead through the chain, stopping at the first acceptance.
    /// Exhaustion is logged, never surfaced: a lost record must not cost the
    /// submitter their report.
    pub async fn save_lead(&self, submission: &AuditSubmission) {
        for store in &self.stores {
            match store.save(submission).await {
                Ok(true) => {
                    info!(backend = store.name(), "Lead persisted");
                    return;
                }
                Ok(false) => {
                    debug!(backend = store.name(), "Backend declined write, trying next");
                }
                Err(err) => {
                    warn!(
                        backend = store.name(),
                        error = %err,
                        "Lead store failed, falling through"
                    );
                }
            }
        }

        error!(email = %submission.email, "Every lead store exhausted; lead not persisted");
    }

    /// List leads from the first backend that answers, newest first.
    /// A backend that answers with an empty set still wins the read; backends
    /// are alternatives, not shards, so results are never merged.
    pub async fn list_leads(&self) -> Vec<Lead> {
        for store in &self.stores {
            match store.list().await {
                Ok(mut leads) => {
                    leads.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                    debug!(backend = store.name(), count = leads.len(), "Leads read");
                    return leads;
                }
                Err(err) => {
                    warn!(backend = store.name(), error = %err, "Lead read failed, trying next");
                }
            }
        }

        Vec::new()
    }
}
