//! Local file lead store - the backstop of the fallback chain.
//!
//! Layout: one JSON array of leads, rewritten in full on every append. No
//! locking against concurrent writers; the chain treats this backend as
//! assumed-reliable and any failure here is logged and swallowed upstream.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

use crate::common::{AuditSubmission, Lead};
use crate::kernel::BaseLeadStore;

pub struct FileLeadStore {
    path: PathBuf,
}

impl FileLeadStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self) -> Result<Vec<Lead>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                serde_json::from_str(&contents).context("Leads file holds invalid JSON")
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err).context("Failed to read leads file"),
        }
    }
}

#[async_trait]
impl BaseLeadStore for FileLeadStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn save(&self, submission: &AuditSubmission) -> Result<bool> {
        let mut leads = self.load().await?;
        leads.push(Lead::from_submission(
            submission,
            Uuid::new_v4().to_string(),
        ));

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create leads directory")?;
        }

        let serialized =
            serde_json::to_string_pretty(&leads).context("Failed to serialize leads")?;
        tokio::fs::write(&self.path, serialized)
            .await
            .context("Failed to write leads file")?;

        debug!(path = %self.path.display(), count = leads.len(), "Leads file rewritten");
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Lead>> {
        self.load().await
    }
}
