//! Report delivery dispatcher.
//!
//! Fire-once email delivery with a deliberate UX rule: the submitter sees
//! success even when delivery is deferred. Missing credentials and
//! credential-shaped provider failures both take the deferred path; only a
//! genuine non-auth send failure surfaces as an error.

use std::sync::Arc;
use tracing::{info, warn};

use crate::common::AuditSubmission;
use crate::kernel::{BaseMailer, MailError};

use super::error::AuditError;

/// Returned when the report was generated but email delivery is deferred.
pub const DEFERRED_MESSAGE: &str =
    "Audit report generated successfully. You will receive it via email within 24 hours.";

/// Returned when the report email was handed to the provider.
pub const SENT_MESSAGE: &str = "Audit report generated and sent successfully";

/// Send the rendered report, or defer.
pub async fn dispatch_report(
    mailer: Option<&Arc<dyn BaseMailer>>,
    submission: &AuditSubmission,
    report_markdown: &str,
    report_html: &str,
) -> Result<&'static str, AuditError> {
    let subject = format!(
        "Your Personalized Business Automation Audit Report - {}",
        submission.business_type
    );

    let Some(mailer) = mailer else {
        log_deferred_report(submission, report_markdown);
        return Ok(DEFERRED_MESSAGE);
    };

    match mailer.send_report(&submission.email, &subject, report_html).await {
        Ok(()) => {
            info!(email = %submission.email, "Audit report email sent");
            Ok(SENT_MESSAGE)
        }
        Err(MailError::Auth(reason)) => {
            warn!(reason = %reason, "Email provider rejected credentials, deferring delivery");
            log_deferred_report(submission, report_markdown);
            Ok(DEFERRED_MESSAGE)
        }
        Err(MailError::Send(err)) => Err(AuditError::Notification(err)),
    }
}

/// Keep a full log record of reports we could not deliver so they can be
/// sent manually within the promised 24-hour window.
fn log_deferred_report(submission: &AuditSubmission, report_markdown: &str) {
    info!(
        name = %submission.name,
        email = %submission.email,
        business_type = %submission.business_type,
        website = %submission.website,
        "=== BUSINESS AUDIT REPORT (deferred delivery) ==="
    );
    info!("{}", report_markdown);
}
