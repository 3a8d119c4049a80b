// Copyright 2026 Loginscout Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for loginscout.
//!
//! Thin boundary over the detection pipeline: `POST /scrape` takes a URL
//! and returns a tagged envelope — success data or a structured failure
//! with a stable error code. The pipeline runs in a spawned task so an
//! unanticipated panic surfaces as `UNKNOWN_ERROR` instead of tearing down
//! the connection.

use crate::error::ScanError;
use crate::fetch::FetchMode;
use crate::pipeline::{DetectionOutcome, Pipeline};
use crate::sink::DetectionLog;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Shared state for the REST handlers.
pub struct AppState {
    pub pipeline: Pipeline,
    /// `None` disables persistence. Sink failures are swallowed with a
    /// diagnostic; they never fail a request.
    pub log: Mutex<Option<DetectionLog>>,
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/scrape", post(handle_scrape))
        .layer(cors)
        .with_state(state)
}

/// Start the REST API server on the given port.
pub async fn start(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("REST API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Deserialize)]
struct ScrapeRequest {
    url: String,
}

async fn handle_scrape(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScrapeRequest>,
) -> Json<Value> {
    let task_state = Arc::clone(&state);
    let url = req.url;
    let result =
        tokio::task::spawn(async move { task_state.pipeline.detect(&url).await }).await;

    let outcome = match result {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => return Json(failure_body(&e)),
        Err(e) => {
            return Json(failure_body(&ScanError::Unknown(format!(
                "detection task panicked: {e}"
            ))))
        }
    };

    // Log-and-continue: persistence must not fail the request.
    {
        let mut guard = state.log.lock().await;
        if let Some(log) = guard.as_mut() {
            if let Err(e) = log.record_outcome(&outcome) {
                warn!("failed to persist detection: {e:#}");
            }
        }
    }

    Json(success_body(&outcome))
}

/// Success envelope: `{ success, data: { url, login_elements, count, rendered } }`.
pub fn success_body(outcome: &DetectionOutcome) -> Value {
    json!({
        "success": true,
        "data": {
            "url": outcome.url.to_string(),
            "login_elements": outcome.elements,
            "count": outcome.elements.len(),
            "rendered": outcome.mode == FetchMode::Rendered,
        }
    })
}

/// Failure envelope: `{ success, error: { error, error_code, details } }`.
pub fn failure_body(e: &ScanError) -> Value {
    let details = match e {
        ScanError::Unknown(d) => Some(d.clone()),
        _ => None,
    };
    json!({
        "success": false,
        "error": {
            "error": e.to_string(),
            "error_code": e.code(),
            "details": details,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{FieldKind, LoginElement};
    use url::Url;

    #[test]
    fn test_success_envelope() {
        let outcome = DetectionOutcome {
            url: Url::parse("https://example.com/").unwrap(),
            elements: vec![LoginElement {
                kind: FieldKind::Password,
                markup: r#"<input type="password">"#.into(),
            }],
            mode: FetchMode::Rendered,
        };
        let body = success_body(&outcome);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["url"], "https://example.com/");
        assert_eq!(body["data"]["count"], 1);
        assert_eq!(body["data"]["rendered"], true);
        assert_eq!(body["data"]["login_elements"][0]["type"], "password");
    }

    #[test]
    fn test_failure_envelope() {
        let body = failure_body(&ScanError::NoLoginElements);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["error_code"], "NO_LOGIN_ELEMENTS");
        assert!(body["error"]["details"].is_null());

        let body = failure_body(&ScanError::Unknown("boom".into()));
        assert_eq!(body["error"]["error_code"], "UNKNOWN_ERROR");
        assert_eq!(body["error"]["details"], "boom");
    }
}
