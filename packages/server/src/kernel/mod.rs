//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod gemini;
pub mod site_fetcher;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ResendAdapter, ServerDeps};
pub use gemini::{GeminiClient, GEMINI_MODEL};
pub use site_fetcher::{HttpSiteFetcher, EXCERPT_MAX_CHARS};
pub use traits::{BaseLeadStore, BaseMailer, BaseReportGenerator, BaseSiteFetcher, MailError};
