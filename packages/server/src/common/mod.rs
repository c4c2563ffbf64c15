//! Shared types used across domains and infrastructure.

pub mod types;

pub use types::{AuditSubmission, Lead, AUDIT_FORM_SOURCE};
