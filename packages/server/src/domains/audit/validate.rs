use crate::common::AuditSubmission;

use super::error::AuditError;

/// The only hard gate in the pipeline: all six required fields present.
///
/// Presence only - no email or URL shape validation. Tightening this would
/// silently reject submissions the form currently accepts.
pub fn validate_submission(submission: &AuditSubmission) -> Result<(), AuditError> {
    let complete = !submission.name.trim().is_empty()
        && !submission.email.trim().is_empty()
        && !submission.website.trim().is_empty()
        && !submission.business_type.trim().is_empty()
        && !submission.current_challenges.trim().is_empty()
        && submission.time_spent_daily > 0.0;

    if !complete {
        return Err(AuditError::Validation("All fields are required".to_string()));
    }

    Ok(())
}
