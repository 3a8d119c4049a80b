//! Chromium-based renderer using chromiumoxide.
//!
//! Launches an isolated headless browser per call and tears it down
//! unconditionally before returning. Launch is deliberately lazy: the
//! pipeline only renders when the static fetch found nothing, so most
//! requests never pay for a browser process.

use crate::error::{ScanError, ScanResult};
use crate::renderer::Renderer;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Fixed settle delay after navigation, for script-driven DOM mutation.
pub const SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Hard bound on one render (launch + navigation + settle + capture).
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. LOGINSCOUT_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("LOGINSCOUT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 3. Common macOS location
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Per-call headless Chromium renderer.
pub struct ChromiumRenderer;

impl ChromiumRenderer {
    pub fn new() -> Self {
        Self
    }

    async fn render_inner(&self, url: &Url) -> Result<String> {
        let chrome_path = find_chromium().context(
            "Chromium not found; install google-chrome or set LOGINSCOUT_CHROMIUM_PATH",
        )?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .build()
            .map_err(|e| anyhow!("failed to build browser config: {e}"))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        // Capture under a hard timeout; teardown runs regardless of outcome.
        let captured = tokio::time::timeout(RENDER_TIMEOUT, capture(&browser, url)).await;
        let result = match captured {
            Ok(r) => r,
            Err(_) => Err(anyhow!(
                "render timed out after {}s",
                RENDER_TIMEOUT.as_secs()
            )),
        };

        if browser.close().await.is_err() {
            let _ = browser.kill().await;
        }
        let _ = browser.wait().await;
        handler_task.abort();
        debug!(url = %url, ok = result.is_ok(), "browser torn down");

        result
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn render(&self, url: &Url) -> ScanResult<String> {
        self.render_inner(url)
            .await
            .map_err(|e| ScanError::Fetch {
                url: url.to_string(),
                reason: format!("{e:#}"),
            })
    }
}

/// Navigate, wait out the settle delay, and serialize the rendered DOM.
async fn capture(browser: &Browser, url: &Url) -> Result<String> {
    let page = browser
        .new_page(url.as_str())
        .await
        .context("failed to open page")?;

    let _ = page.wait_for_navigation().await;
    tokio::time::sleep(SETTLE_DELAY).await;

    let result = page
        .evaluate("document.documentElement.outerHTML")
        .await
        .context("failed to capture rendered markup")?;

    let markup: String = result
        .into_value()
        .map_err(|e| anyhow!("failed to convert markup result: {e:?}"))?;

    let _ = page.close().await;
    Ok(markup)
}
