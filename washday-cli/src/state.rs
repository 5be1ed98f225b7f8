use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$WASHDAY_HOME`, or `~/.washday`.
pub fn washday_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("WASHDAY_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".washday"))
}

pub fn ensure_washday_home() -> Result<PathBuf> {
    let dir = washday_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(washday_home()?.join("config.toml"))
}

pub fn events_path() -> Result<PathBuf> {
    Ok(washday_home()?.join("events.json"))
}

pub fn washes_path() -> Result<PathBuf> {
    Ok(washday_home()?.join("washes.json"))
}
