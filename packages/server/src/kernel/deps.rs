//! Server dependencies for the audit pipeline (using traits for testability)
//!
//! This module provides the central dependency container used by the HTTP
//! handlers. All external services use trait abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use resend_client::{ResendClient, ResendError, SendEmailRequest};
use std::sync::Arc;
use tracing::warn;

use crate::config::{is_placeholder_key, Config};
use crate::domains::audit::data::LeadRouter;
use crate::kernel::{
    BaseMailer, BaseReportGenerator, BaseSiteFetcher, GeminiClient, HttpSiteFetcher, MailError,
};

// =============================================================================
// ResendClient Adapter (implements BaseMailer trait)
// =============================================================================

/// Sender identity on outbound report emails.
const REPORT_FROM: &str = "Ayothedoc Audits <audits@ayothedoc.com>";

/// Wrapper around ResendClient that implements the BaseMailer trait
pub struct ResendAdapter(pub Arc<ResendClient>);

impl ResendAdapter {
    pub fn new(client: Arc<ResendClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseMailer for ResendAdapter {
    async fn send_report(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> std::result::Result<(), MailError> {
        let request = SendEmailRequest {
            from: REPORT_FROM.to_string(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            html: html.to_string(),
        };

        match self.0.send_email(request).await {
            Ok(_) => Ok(()),
            Err(err @ ResendError::Auth(_)) => Err(MailError::Auth(err.to_string())),
            Err(err) => Err(MailError::Send(anyhow::anyhow!("{}", err))),
        }
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to the audit pipeline and lead endpoints.
///
/// `report_generator` is `None` when no Gemini key is configured; the
/// pipeline turns that into a 503 before touching the network.
/// `mailer` is `None` when no usable Resend key is configured; the
/// dispatcher turns that into a deferred-delivery success.
#[derive(Clone)]
pub struct ServerDeps {
    pub site_fetcher: Arc<dyn BaseSiteFetcher>,
    pub report_generator: Option<Arc<dyn BaseReportGenerator>>,
    pub mailer: Option<Arc<dyn BaseMailer>>,
    pub leads: Arc<LeadRouter>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        site_fetcher: Arc<dyn BaseSiteFetcher>,
        report_generator: Option<Arc<dyn BaseReportGenerator>>,
        mailer: Option<Arc<dyn BaseMailer>>,
        leads: Arc<LeadRouter>,
    ) -> Self {
        Self {
            site_fetcher,
            report_generator,
            mailer,
            leads,
        }
    }

    /// Wire real infrastructure from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let site_fetcher: Arc<dyn BaseSiteFetcher> = Arc::new(HttpSiteFetcher::new()?);

        let report_generator: Option<Arc<dyn BaseReportGenerator>> =
            match config.gemini_api_key.as_deref() {
                Some(key) => Some(Arc::new(GeminiClient::new(key.to_string())?)),
                None => {
                    warn!("GEMINI_API_KEY not configured; audit requests will return 503");
                    None
                }
            };

        let mailer: Option<Arc<dyn BaseMailer>> = match config.resend_api_key.as_deref() {
            Some(key) if !is_placeholder_key(key) => Some(Arc::new(ResendAdapter::new(
                Arc::new(ResendClient::new(key.to_string())),
            ))),
            Some(_) => {
                warn!("RESEND_API_KEY looks like a placeholder; report emails will be deferred");
                None
            }
            None => {
                warn!("RESEND_API_KEY not configured; report emails will be deferred");
                None
            }
        };

        let leads = Arc::new(LeadRouter::from_config(config)?);

        Ok(Self::new(site_fetcher, report_generator, mailer, leads))
    }
}
