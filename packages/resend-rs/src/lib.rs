//! Pure Resend REST API client
//!
//! A minimal client for the Resend transactional email API with no
//! domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use resend_client::{ResendClient, SendEmailRequest};
//!
//! let client = ResendClient::new("re_...".to_string());
//!
//! client.send_email(SendEmailRequest {
//!     from: "Reports <reports@example.com>".into(),
//!     to: vec!["customer@example.com".into()],
//!     subject: "Your report".into(),
//!     html: "<h1>Hello</h1>".into(),
//! }).await?;
//! ```

pub mod error;

pub use error::{ResendError, Result};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// One outbound email.
#[derive(Debug, Clone, Serialize)]
pub struct SendEmailRequest {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Response from the Resend send endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailResponse {
    pub id: String,
}

/// Pure Resend API client.
#[derive(Clone)]
pub struct ResendClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl ResendClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client from the `RESEND_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("RESEND_API_KEY")
            .map_err(|_| ResendError::Config("RESEND_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Override the API base URL (used by tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send a single email. One attempt, no retries.
    pub async fn send_email(&self, request: SendEmailRequest) -> Result<SendEmailResponse> {
        let url = format!("{}/emails", self.base_url);

        debug!(to = ?request.to, subject = %request.subject, "Sending email via Resend");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ResendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(ResendError::Auth(format!("{}: {}", status, body)));
            }
            return Err(ResendError::Api(format!("{}: {}", status, body)));
        }

        response
            .json::<SendEmailResponse>()
            .await
            .map_err(|e| ResendError::Parse(e.to_string()))
    }
}
