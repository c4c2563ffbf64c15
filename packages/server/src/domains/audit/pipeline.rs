//! The audit pipeline: validate -> fetch -> generate -> render -> persist ->
//! notify, strictly sequential within one request.
//!
//! Recovery rules:
//! - fetch failure: placeholder excerpt, continue
//! - render failure: handled inside the renderer, continue
//! - persistence failure: logged inside the router, continue
//! - generation / non-auth mail failure: surfaced to the caller

use tracing::{info, warn};

use crate::common::AuditSubmission;
use crate::kernel::ServerDeps;

use super::error::AuditError;
use super::notify::dispatch_report;
use super::prompt::build_audit_prompt;
use super::render::render_report_html;
use super::validate::validate_submission;

/// Placeholder excerpt when the lead's website cannot be analyzed.
pub const CONTENT_UNAVAILABLE: &str = "Website content could not be analyzed";

/// Run one audit submission end to end. Returns the user-facing message.
pub async fn run_audit(
    deps: &ServerDeps,
    submission: &AuditSubmission,
) -> Result<&'static str, AuditError> {
    validate_submission(submission)?;

    info!(
        email = %submission.email,
        business_type = %submission.business_type,
        website = %submission.website,
        "Received audit request"
    );

    // Credential check comes before any network call.
    let generator = deps
        .report_generator
        .as_ref()
        .ok_or(AuditError::Unconfigured)?;

    let excerpt = match deps.site_fetcher.fetch_excerpt(&submission.website).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => CONTENT_UNAVAILABLE.to_string(),
        Err(err) => {
            warn!(website = %submission.website, error = %err, "Could not fetch website content");
            CONTENT_UNAVAILABLE.to_string()
        }
    };

    let prompt = build_audit_prompt(submission, &excerpt);
    let report = generator
        .generate(&prompt)
        .await
        .map_err(AuditError::Generation)?;
    info!(report_chars = report.len(), "Audit report generated");

    let html = render_report_html(&report);

    // Best-effort durable record. The router logs and swallows every backend
    // failure; the submitter's response never depends on the outcome.
    deps.leads.save_lead(submission).await;

    dispatch_report(deps.mailer.as_ref(), submission, &report, &html).await
}
