// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (validation, prompt building, fallback order) lives in
// domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMailer, BaseLeadStore)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::common::{AuditSubmission, Lead};

// =============================================================================
// Site Fetcher Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseSiteFetcher: Send + Sync {
    /// Fetch a website and reduce it to a bounded plain-text excerpt.
    /// One attempt only; the caller decides what to do on failure.
    async fn fetch_excerpt(&self, url: &str) -> Result<String>;
}

// =============================================================================
// Report Generator Trait (Infrastructure - Generic LLM completion)
// =============================================================================

#[async_trait]
pub trait BaseReportGenerator: Send + Sync {
    /// Complete a prompt with an LLM (returns raw markdown text).
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// =============================================================================
// Mailer Trait (Infrastructure - transactional email)
// =============================================================================

/// Mail failures split by whether they are credential-shaped, because the
/// dispatcher downgrades auth failures to a deferred-delivery success.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("email provider rejected credentials: {0}")]
    Auth(String),

    #[error(transparent)]
    Send(#[from] anyhow::Error),
}

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Send exactly one email. No retries, no queueing.
    async fn send_report(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> std::result::Result<(), MailError>;
}

// =============================================================================
// Lead Store Trait (Infrastructure - one persistence backend)
// =============================================================================

#[async_trait]
pub trait BaseLeadStore: Send + Sync {
    /// Short backend name for logging ("postgres", "airtable", "file").
    fn name(&self) -> &'static str;

    /// Persist one lead. `Ok(true)` means this backend accepted the write;
    /// `Ok(false)` or `Err` means the router should try the next backend.
    async fn save(&self, submission: &AuditSubmission) -> Result<bool>;

    /// List every lead this backend holds, unsorted.
    async fn list(&self) -> Result<Vec<Lead>>;
}
