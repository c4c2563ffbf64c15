// Test dependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.
// Each mock records its calls so tests can assert on side-effect counts.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{BaseLeadStore, BaseMailer, BaseReportGenerator, BaseSiteFetcher, MailError};
use crate::common::{AuditSubmission, Lead};

// =============================================================================
// Mock Site Fetcher
// =============================================================================

pub struct MockSiteFetcher {
    excerpt: Option<String>,
    calls: AtomicUsize,
}

impl MockSiteFetcher {
    /// Fetcher that returns the given excerpt.
    pub fn returning(excerpt: &str) -> Self {
        Self {
            excerpt: Some(excerpt.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fetcher that fails every call (unreachable site / timeout).
    pub fn failing() -> Self {
        Self {
            excerpt: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BaseSiteFetcher for MockSiteFetcher {
    async fn fetch_excerpt(&self, _url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.excerpt {
            Some(excerpt) => Ok(excerpt.clone()),
            None => anyhow::bail!("connection timed out"),
        }
    }
}

// =============================================================================
// Mock Report Generator
// =============================================================================

pub struct MockReportGenerator {
    report: Option<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockReportGenerator {
    pub fn returning(report: &str) -> Self {
        Self {
            report: Some(report.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            report: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseReportGenerator for MockReportGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.report {
            Some(report) => Ok(report.clone()),
            None => anyhow::bail!("model call failed"),
        }
    }
}

// =============================================================================
// Mock Mailer
// =============================================================================

enum MailOutcome {
    Delivered,
    AuthFailure,
    SendFailure,
}

pub struct MockMailer {
    outcome: MailOutcome,
    calls: AtomicUsize,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockMailer {
    pub fn delivering() -> Self {
        Self::with_outcome(MailOutcome::Delivered)
    }

    /// Mailer that fails with a credential-shaped error (401/403).
    pub fn failing_auth() -> Self {
        Self::with_outcome(MailOutcome::AuthFailure)
    }

    /// Mailer that fails with a non-auth send error.
    pub fn failing_send() -> Self {
        Self::with_outcome(MailOutcome::SendFailure)
    }

    fn with_outcome(outcome: MailOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (recipient, subject) pairs for delivered mail.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send_report(
        &self,
        to: &str,
        subject: &str,
        _html: &str,
    ) -> std::result::Result<(), MailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            MailOutcome::Delivered => {
                self.sent
                    .lock()
                    .unwrap()
                    .push((to.to_string(), subject.to_string()));
                Ok(())
            }
            MailOutcome::AuthFailure => Err(MailError::Auth("401: invalid key".to_string())),
            MailOutcome::SendFailure => {
                Err(MailError::Send(anyhow::anyhow!("552 mailbox unavailable")))
            }
        }
    }
}

// =============================================================================
// Mock Lead Store
// =============================================================================

enum StoreOutcome {
    Accept,
    Fail,
}

pub struct MockLeadStore {
    name: &'static str,
    outcome: StoreOutcome,
    leads: Mutex<Vec<Lead>>,
    save_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MockLeadStore {
    pub fn accepting(name: &'static str) -> Self {
        Self::with_outcome(name, StoreOutcome::Accept)
    }

    pub fn failing(name: &'static str) -> Self {
        Self::with_outcome(name, StoreOutcome::Fail)
    }

    fn with_outcome(name: &'static str, outcome: StoreOutcome) -> Self {
        Self {
            name,
            outcome,
            leads: Mutex::new(Vec::new()),
            save_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Preload leads for list() to return.
    pub fn with_leads(self, leads: Vec<Lead>) -> Self {
        *self.leads.lock().unwrap() = leads;
        self
    }

    pub fn save_call_count(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Leads this store accepted.
    pub fn saved(&self) -> Vec<Lead> {
        self.leads.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseLeadStore for MockLeadStore {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn save(&self, submission: &AuditSubmission) -> Result<bool> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            StoreOutcome::Accept => {
                let id = format!("{}-{}", self.name, self.save_calls.load(Ordering::SeqCst));
                self.leads
                    .lock()
                    .unwrap()
                    .push(Lead::from_submission(submission, id));
                Ok(true)
            }
            StoreOutcome::Fail => anyhow::bail!("{} backend unavailable", self.name),
        }
    }

    async fn list(&self) -> Result<Vec<Lead>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            StoreOutcome::Accept => Ok(self.leads.lock().unwrap().clone()),
            StoreOutcome::Fail => anyhow::bail!("{} backend unavailable", self.name),
        }
    }
}

/// A complete, valid submission shared by several tests.
pub fn sample_submission() -> AuditSubmission {
    AuditSubmission {
        name: "Acme".to_string(),
        email: "a@acme.com".to_string(),
        website: "https://acme.example".to_string(),
        business_type: "E-commerce".to_string(),
        current_challenges: "manual order entry".to_string(),
        time_spent_daily: 5.0,
        opt_in_marketing: false,
    }
}

/// A lead with a fixed timestamp, for sort-order tests.
pub fn lead_at(id: &str, timestamp: chrono::DateTime<chrono::Utc>) -> Lead {
    Lead {
        id: id.to_string(),
        name: format!("Lead {}", id),
        email: format!("{}@example.com", id),
        website: "https://example.com".to_string(),
        business_type: "Services".to_string(),
        current_challenges: "none".to_string(),
        time_spent_daily: 2.0,
        opt_in_marketing: false,
        timestamp,
        source: None,
    }
}

/// Build ServerDeps entirely from mocks.
pub fn mock_deps(
    fetcher: Arc<MockSiteFetcher>,
    generator: Option<Arc<MockReportGenerator>>,
    mailer: Option<Arc<MockMailer>>,
    stores: Vec<Arc<dyn BaseLeadStore>>,
) -> super::ServerDeps {
    super::ServerDeps::new(
        fetcher,
        generator.map(|g| g as Arc<dyn BaseReportGenerator>),
        mailer.map(|m| m as Arc<dyn BaseMailer>),
        Arc::new(crate::domains::audit::data::LeadRouter::new(stores)),
    )
}
