//! `loginscout scan <url>` — one-shot detection of a single page.

use crate::pipeline::Pipeline;
use crate::renderer::chromium::ChromiumRenderer;
use crate::rest;
use crate::sink::DetectionLog;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Run the scan command.
pub async fn run(url: &str, json: bool, no_log: bool, log_file: Option<&str>) -> Result<()> {
    let pipeline = Pipeline::new(Arc::new(ChromiumRenderer::new()));

    let outcome = match pipeline.detect(url).await {
        Ok(o) => o,
        Err(e) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&rest::failure_body(&e))?);
            }
            return Err(anyhow::anyhow!("[{}] {e}", e.code()));
        }
    };

    if !no_log {
        let opened = match log_file {
            Some(p) => DetectionLog::open(&PathBuf::from(p)),
            None => DetectionLog::default_log(),
        };
        match opened {
            Ok(mut log) => {
                if let Err(e) = log.record_outcome(&outcome) {
                    warn!("failed to persist detection: {e:#}");
                }
            }
            Err(e) => warn!("detection log unavailable: {e:#}"),
        }
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rest::success_body(&outcome))?
        );
    } else {
        println!(
            "Found {} login element(s) on {} ({} fetch)",
            outcome.elements.len(),
            outcome.url,
            outcome.mode,
        );
        for element in &outcome.elements {
            println!("  [{}] {}", element.kind, element.markup);
        }
    }

    Ok(())
}
