//! Website content fetcher - retrieves a lead's site and distills it into a
//! bounded plain-text excerpt for prompting.
//!
//! This implementation:
//! - Uses reqwest for HTTP with a hard 10-second timeout
//! - Strips script/style blocks and remaining tags with regexes
//! - Collapses whitespace and truncates to EXCERPT_MAX_CHARS
//!
//! One attempt only, no retries. Failure handling belongs to the caller
//! (the audit pipeline substitutes a placeholder and continues).

use anyhow::{Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;
use tracing::debug;

use super::BaseSiteFetcher;

/// Maximum excerpt length in characters.
pub const EXCERPT_MAX_CHARS: usize = 3000;

/// Hard bound on the whole fetch, connect included.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Crawler-identifying user agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; AuditBot/1.0)";

lazy_static! {
    static ref SCRIPT_RE: Regex =
        Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("script regex is valid");
    static ref STYLE_RE: Regex =
        Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("style regex is valid");
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").expect("tag regex is valid");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("whitespace regex is valid");
}

/// HTTP-backed site fetcher.
pub struct HttpSiteFetcher {
    client: reqwest::Client,
}

impl HttpSiteFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Normalize URL by adding https:// if no scheme is present
    fn normalize_url(url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{}", url)
        }
    }

    /// Reduce raw HTML to a whitespace-collapsed, tag-free excerpt.
    fn clean_html(html: &str) -> String {
        let without_scripts = SCRIPT_RE.replace_all(html, " ");
        let without_styles = STYLE_RE.replace_all(&without_scripts, " ");
        let without_tags = TAG_RE.replace_all(&without_styles, " ");
        let collapsed = WHITESPACE_RE.replace_all(&without_tags, " ");
        truncate_chars(collapsed.trim(), EXCERPT_MAX_CHARS)
    }
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[async_trait]
impl BaseSiteFetcher for HttpSiteFetcher {
    async fn fetch_excerpt(&self, url: &str) -> Result<String> {
        let url = Self::normalize_url(url);
        debug!(url = %url, "Fetching website content");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Website request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        let html = response
            .text()
            .await
            .context("Failed to read website body")?;

        Ok(Self::clean_html(&html))
    }
}
