//! Renderer abstraction for browser-based page rendering.
//!
//! The rendered fetch is the one external-process dependency in the system,
//! so it sits behind the [`Renderer`] trait. The orchestrator only sees
//! `render(url) -> markup`, which keeps its fallback logic testable with a
//! fake renderer.

pub mod chromium;

use crate::error::ScanResult;
use async_trait::async_trait;
use url::Url;

/// A browser engine that can render a page and return its final markup.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Navigate to `url`, let scripts run, and capture the resulting DOM
    /// as serialized markup. Implementations must tear down any process
    /// they spawn before returning, on every exit path.
    async fn render(&self, url: &Url) -> ScanResult<String>;
}
