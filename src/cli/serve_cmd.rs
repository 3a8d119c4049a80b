//! `loginscout serve` — run the HTTP API.

use crate::pipeline::Pipeline;
use crate::renderer::chromium::ChromiumRenderer;
use crate::rest::{self, AppState};
use crate::sink::DetectionLog;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Run the serve command.
pub async fn run(port: u16, no_log: bool) -> Result<()> {
    let log = if no_log {
        None
    } else {
        match DetectionLog::default_log() {
            Ok(log) => Some(log),
            Err(e) => {
                warn!("detection log disabled: {e:#}");
                None
            }
        }
    };

    let state = Arc::new(AppState {
        pipeline: Pipeline::new(Arc::new(ChromiumRenderer::new())),
        log: Mutex::new(log),
    });

    rest::start(port, state).await
}
