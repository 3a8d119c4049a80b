//! `loginscout doctor` — check environment and diagnose issues.

use crate::renderer::chromium::find_chromium;
use crate::sink::{default_log_path, DetectionLog};
use anyhow::Result;

/// Run the doctor command.
pub async fn run() -> Result<()> {
    match find_chromium() {
        Some(path) => println!("  Chromium: {}", path.display()),
        None => {
            println!("  Chromium: not found — rendered fallback unavailable");
            println!("    Install google-chrome or set LOGINSCOUT_CHROMIUM_PATH.");
        }
    }

    let log_path = default_log_path();
    print!("  Detection log: {} ", log_path.display());
    match DetectionLog::open(&log_path) {
        Ok(_) => println!("(writable)"),
        Err(e) => println!("(not writable: {e:#})"),
    }

    Ok(())
}
