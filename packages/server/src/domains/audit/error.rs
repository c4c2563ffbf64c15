use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Audit pipeline errors.
///
/// Fetch, render and persistence failures never appear here: the pipeline
/// recovers from them internally. Only the failures the submitter must see
/// get a variant.
#[derive(Debug, Error)]
pub enum AuditError {
    /// User input incomplete. No side effects were attempted.
    #[error("{0}")]
    Validation(String),

    /// Generation credential missing; checked before any network call.
    #[error("Service temporarily unavailable. Please try again later.")]
    Unconfigured,

    /// The model call failed. No partial report is persisted or emailed.
    #[error("Failed to generate audit report")]
    Generation(#[source] anyhow::Error),

    /// Email send failed for a non-auth reason.
    #[error("Failed to generate audit report")]
    Notification(#[source] anyhow::Error),
}

impl AuditError {
    fn status(&self) -> StatusCode {
        match self {
            AuditError::Validation(_) => StatusCode::BAD_REQUEST,
            AuditError::Unconfigured => StatusCode::SERVICE_UNAVAILABLE,
            AuditError::Generation(_) | AuditError::Notification(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuditError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Admin lead list/export errors.
#[derive(Debug, Error)]
pub enum LeadsError {
    /// Bad or missing bearer token. Deliberately opaque: the response does
    /// not distinguish "missing" from "wrong".
    #[error("Unauthorized")]
    Unauthorized,

    /// Export requested with zero leads in every backend.
    #[error("No leads found")]
    NotFound,

    /// Export requested with a format other than csv.
    #[error("Invalid format requested")]
    BadFormat,

    #[error("Failed to retrieve leads")]
    Internal(#[source] anyhow::Error),
}

impl LeadsError {
    fn status(&self) -> StatusCode {
        match self {
            LeadsError::Unauthorized => StatusCode::UNAUTHORIZED,
            LeadsError::NotFound => StatusCode::NOT_FOUND,
            LeadsError::BadFormat => StatusCode::BAD_REQUEST,
            LeadsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LeadsError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
