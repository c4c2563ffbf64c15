use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::common::AuditSubmission;
use crate::domains::audit::{run_audit, AuditError};
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct AuditResponse {
    pub success: bool,
    pub message: String,
}

/// `POST /api/business-audit` - run the full audit pipeline.
///
/// Every accepted-and-processed path returns 200 `{success, message}`,
/// including deferred-email paths. Failures map through `AuditError`.
pub async fn business_audit_handler(
    Extension(state): Extension<AppState>,
    Json(submission): Json<AuditSubmission>,
) -> Result<Json<AuditResponse>, AuditError> {
    let message = run_audit(&state.deps, &submission).await?;

    Ok(Json(AuditResponse {
        success: true,
        message: message.to_string(),
    }))
}
