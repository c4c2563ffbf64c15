//! Error types for the Resend client.

use thiserror::Error;

/// Result type for Resend client operations.
pub type Result<T> = std::result::Result<T, ResendError>;

/// Resend client errors.
#[derive(Debug, Error)]
pub enum ResendError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication error (invalid or revoked API key)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// API error (non-2xx response other than auth)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ResendError {
    /// True when the failure is credential-shaped (401/403 from the API).
    pub fn is_auth(&self) -> bool {
        matches!(self, ResendError::Auth(_))
    }
}
