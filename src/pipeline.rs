//! The adaptive detection pipeline.
//!
//! One invocation runs validator → fetcher → parser → classifier strictly
//! in sequence, with at most one fallback round: if the static attempt
//! classifies to zero elements, the page is re-fetched through the renderer
//! and classified once more. Any other failure is terminal where it occurs.
//! No state survives between invocations, so concurrent detections need no
//! coordination.

use crate::classify::{self, LoginElement};
use crate::error::{ScanError, ScanResult};
use crate::fetch::{FetchMode, StaticFetcher};
use crate::parse;
use crate::renderer::Renderer;
use crate::validate;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// The sole output of the core: the normalized URL, the ordered element
/// sequence, and the fetch mode that produced it.
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub url: Url,
    pub elements: Vec<LoginElement>,
    pub mode: FetchMode,
}

/// Sequences the pipeline stages over a static fetcher and a renderer.
pub struct Pipeline {
    fetcher: StaticFetcher,
    renderer: Arc<dyn Renderer>,
}

impl Pipeline {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            fetcher: StaticFetcher::new(),
            renderer,
        }
    }

    /// Detect login elements on the page at `input`.
    ///
    /// Static fetching is cheap and sufficient for server-rendered pages;
    /// the expensive rendered fetch is reserved for pages whose login form
    /// only materializes after script execution. Only an empty classification
    /// triggers the fallback — a transport or parse error never does.
    pub async fn detect(&self, input: &str) -> ScanResult<DetectionOutcome> {
        let url = validate::validate(input)?;
        debug!(url = %url, "starting detection");

        match self.attempt(&url, FetchMode::Static).await {
            Err(ScanError::NoLoginElements) => {
                info!(url = %url, "static attempt found nothing, rendering");
                self.attempt(&url, FetchMode::Rendered).await
            }
            other => other,
        }
    }

    async fn attempt(&self, url: &Url, mode: FetchMode) -> ScanResult<DetectionOutcome> {
        let markup = match mode {
            FetchMode::Static => self.fetcher.fetch(url).await?.markup,
            FetchMode::Rendered => self.renderer.render(url).await?,
        };

        // Parse and classify in one synchronous stretch: the document tree
        // is !Send and must not live across an await point.
        let elements = {
            let doc = parse::parse(&markup)?;
            classify::classify(&doc)?
        };

        debug!(url = %url, %mode, count = elements.len(), "classification done");
        Ok(DetectionOutcome {
            url: url.clone(),
            elements,
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubRenderer(&'static str);

    #[async_trait]
    impl Renderer for StubRenderer {
        async fn render(&self, _url: &Url) -> ScanResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_invalid_url_is_terminal() {
        let pipeline = Pipeline::new(Arc::new(StubRenderer("<p></p>")));
        let err = pipeline.detect("not a url").await.unwrap_err();
        assert_eq!(err.code(), "INVALID_URL");
    }
}
