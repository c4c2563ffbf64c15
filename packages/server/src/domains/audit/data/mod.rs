//! Lead persistence backends and the fallback router.

pub mod airtable;
pub mod file;
pub mod postgres;
pub mod router;

pub use airtable::AirtableLeadStore;
pub use file::FileLeadStore;
pub use postgres::PostgresLeadStore;
pub use router::LeadRouter;
