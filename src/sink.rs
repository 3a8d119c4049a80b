//! JSONL detection log — append-only record of detected elements.
//!
//! One line per element: URL, field type, raw markup, UTC timestamp.
//! Rotates when the file exceeds `MAX_LOG_SIZE`; rotated files are named
//! `.1`, `.2`, etc. (max 5). Persistence failures are the caller's problem
//! to swallow: a detection never fails because its log write did.

use crate::classify::FieldKind;
use crate::pipeline::DetectionOutcome;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Maximum log size before rotation (50 MB).
const MAX_LOG_SIZE: u64 = 50 * 1024 * 1024;

/// Maximum number of rotated log files to keep.
const MAX_ROTATIONS: u32 = 5;

/// A single persisted detection record.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionRecord {
    pub url: String,
    pub field_type: FieldKind,
    pub markup: String,
    pub timestamp: String,
}

/// Append-only JSONL log with automatic rotation.
pub struct DetectionLog {
    file: File,
    path: PathBuf,
    /// Approximate current size (re-checked on rotation).
    current_size: u64,
}

impl DetectionLog {
    /// Open or create the log file at `path`.
    pub fn open(path: &PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open detection log: {}", path.display()))?;

        let current_size = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            file,
            path: path.clone(),
            current_size,
        })
    }

    /// Open the default log at ~/.loginscout/detections.jsonl.
    pub fn default_log() -> Result<Self> {
        Self::open(&default_log_path())
    }

    /// Append one record per element of a successful outcome. All records
    /// from one outcome share a timestamp.
    pub fn record_outcome(&mut self, outcome: &DetectionOutcome) -> Result<()> {
        let timestamp = Utc::now().to_rfc3339();
        for element in &outcome.elements {
            self.append(&DetectionRecord {
                url: outcome.url.to_string(),
                field_type: element.kind,
                markup: element.markup.clone(),
                timestamp: timestamp.clone(),
            })?;
        }
        Ok(())
    }

    fn append(&mut self, record: &DetectionRecord) -> Result<()> {
        if self.current_size >= MAX_LOG_SIZE {
            self.rotate()?;
        }

        let json = serde_json::to_string(record)?;
        writeln!(self.file, "{json}").context("failed to append detection record")?;
        self.current_size += json.len() as u64 + 1;
        Ok(())
    }

    /// Rotate: detections.jsonl → .1, .1 → .2, etc.
    fn rotate(&mut self) -> Result<()> {
        self.file.flush()?;

        for i in (1..MAX_ROTATIONS).rev() {
            let from = rotation_path(&self.path, i);
            let to = rotation_path(&self.path, i + 1);
            if from.exists() {
                let _ = std::fs::rename(&from, &to);
            }
        }

        let first_rotation = rotation_path(&self.path, 1);
        let _ = std::fs::rename(&self.path, &first_rotation);

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| "failed to reopen detection log after rotation")?;
        self.current_size = 0;

        Ok(())
    }
}

/// Default log location.
pub fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".loginscout")
        .join("detections.jsonl")
}

/// Build path for a rotated log file: `detections.jsonl.1`, etc.
fn rotation_path(base: &std::path::Path, index: u32) -> PathBuf {
    let name = format!(
        "{}.{index}",
        base.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("detections.jsonl")
    );
    base.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{FieldKind, LoginElement};
    use crate::fetch::FetchMode;
    use url::Url;

    fn outcome() -> DetectionOutcome {
        DetectionOutcome {
            url: Url::parse("https://example.com/login").unwrap(),
            elements: vec![
                LoginElement {
                    kind: FieldKind::Password,
                    markup: r#"<input type="password">"#.into(),
                },
                LoginElement {
                    kind: FieldKind::Credential,
                    markup: r#"<input name="user">"#.into(),
                },
            ],
            mode: FetchMode::Static,
        }
    }

    #[test]
    fn test_records_appended_as_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detections.jsonl");
        let mut log = DetectionLog::open(&path).unwrap();

        log.record_outcome(&outcome()).unwrap();
        log.record_outcome(&outcome()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["url"], "https://example.com/login");
        assert_eq!(first["field_type"], "password");
        assert!(first["timestamp"].as_str().unwrap().contains('T'));

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["field_type"], "credential");
        // Same outcome, same timestamp
        assert_eq!(first["timestamp"], second["timestamp"]);
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detections.jsonl");

        DetectionLog::open(&path).unwrap().record_outcome(&outcome()).unwrap();
        DetectionLog::open(&path).unwrap().record_outcome(&outcome()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_rotation_path_naming() {
        let base = PathBuf::from("/tmp/x/detections.jsonl");
        assert_eq!(
            rotation_path(&base, 1),
            PathBuf::from("/tmp/x/detections.jsonl.1")
        );
        assert_eq!(
            rotation_path(&base, 3),
            PathBuf::from("/tmp/x/detections.jsonl.3")
        );
    }
}
