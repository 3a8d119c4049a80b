//! Static page fetcher wrapping reqwest.
//!
//! Not a browser — a single plain GET with a realistic user-agent. Pages
//! that only materialize their login form after script execution come back
//! empty here; the pipeline covers those with the rendered fallback.

use crate::error::{ScanError, ScanResult};
use std::time::Duration;
use url::Url;

/// Fixed request timeout for a static fetch.
pub const STATIC_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/131.0.0.0 Safari/537.36";

/// Which fetch strategy produced a page's markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Plain HTTP GET, no script execution.
    Static,
    /// Full headless-browser render.
    Rendered,
}

impl std::fmt::Display for FetchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchMode::Static => write!(f, "static"),
            FetchMode::Rendered => write!(f, "rendered"),
        }
    }
}

/// Raw markup plus the mode that produced it. Owned by the orchestrator for
/// the duration of one pipeline attempt; never cached.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub markup: String,
    pub mode: FetchMode,
}

/// HTTP client for static fetches.
#[derive(Clone)]
pub struct StaticFetcher {
    client: reqwest::Client,
}

impl StaticFetcher {
    /// Create a client with the standard Chrome user-agent and fixed timeout.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(STATIC_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Perform a single GET. No retries: any transport error or non-2xx
    /// status surfaces immediately as [`ScanError::Fetch`].
    pub async fn fetch(&self, url: &Url) -> ScanResult<FetchResult> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ScanError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScanError::Fetch {
                url: url.to_string(),
                reason: format!("unexpected status {status}"),
            });
        }

        let markup = resp.text().await.map_err(|e| ScanError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(FetchResult {
            markup,
            mode: FetchMode::Static,
        })
    }
}
