//! Target events and the manual wash log, stored as JSON.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use washday_core::{TargetEvent, WashDay, WashLog};

/// Read a JSON array of events. A missing file means no events.
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<TargetEvent>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let events: Vec<TargetEvent> =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    debug!(path = %path.display(), events = events.len(), "loaded events");
    Ok(events)
}

/// Read manual washes. Duplicate dates resolve to the last entry in the file.
pub fn load_wash_log(path: impl AsRef<Path>) -> Result<WashLog> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(WashLog::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let entries: Vec<WashDay> =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    let log = WashLog::from_entries(entries);
    debug!(path = %path.display(), washes = log.len(), "loaded wash log");
    Ok(log)
}

/// Write the log as a JSON array in date order. Suggested entries are never
/// written; they are recomputed on every run.
pub fn save_wash_log(path: impl AsRef<Path>, log: &WashLog) -> Result<()> {
    let path = path.as_ref();
    let manual: Vec<&WashDay> = log.iter().filter(|w| w.kind.is_manual()).collect();
    let json = serde_json::to_string_pretty(&manual).context("serialize wash log")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
