use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use washday_core::{FlexibilityMode, Hairstyle, Settings};

use crate::state::{config_path, ensure_washday_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: SettingsSection,
    pub profile: ProfileSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSection {
    pub days_to_ideal: u32,
    pub style_duration: u32,
    pub tolerance_days: u32,
    pub flexibility_mode: FlexibilityMode,
    pub humidity_threshold: f64,
    /// Display label, e.g. "Twist-out".
    pub hairstyle: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Default filter when RUST_LOG is unset.
    pub level: String,
}

impl Default for SettingsSection {
    fn default() -> Self {
        let s = Settings::default();
        Self {
            days_to_ideal: s.days_to_ideal,
            style_duration: s.style_duration,
            tolerance_days: s.tolerance_days,
            flexibility_mode: s.flexibility_mode,
            humidity_threshold: s.humidity_threshold,
            hairstyle: None,
        }
    }
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl SettingsSection {
    /// Engine settings, validated.
    pub fn to_settings(&self) -> Result<Settings> {
        let hairstyle = self
            .hairstyle
            .as_deref()
            .map(|label| {
                Hairstyle::from_label(label).ok_or_else(|| anyhow!("unknown hairstyle '{label}'"))
            })
            .transpose()?;

        let settings = Settings {
            days_to_ideal: self.days_to_ideal,
            style_duration: self.style_duration,
            tolerance_days: self.tolerance_days,
            flexibility_mode: self.flexibility_mode,
            humidity_threshold: self.humidity_threshold,
            hairstyle,
        };
        settings.validate().context("config [settings]")?;
        Ok(settings)
    }
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config() -> Result<Config> {
    read_config(&config_path()?)
}

/// Config at `p`, or defaults when the file does not exist.
pub fn read_config(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    ensure_washday_home()?;
    write_config(&config_path()?, cfg)
}

pub fn write_config(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
