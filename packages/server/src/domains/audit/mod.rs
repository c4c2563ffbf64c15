//! Audit domain: the lead ingestion and report delivery pipeline, plus the
//! admin read path over persisted leads.

pub mod data;
pub mod error;
pub mod leads;
pub mod notify;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod validate;

pub use error::{AuditError, LeadsError};
pub use pipeline::{run_audit, CONTENT_UNAVAILABLE};
