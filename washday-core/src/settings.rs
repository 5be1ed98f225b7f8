//! User-tunable parameters for the decay curve and wash cadence.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hairstyle::Hairstyle;

pub const DEFAULT_HUMIDITY_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexibilityMode {
    /// Wash as soon as the style window closes.
    Strict,
    /// Use half of the tolerance.
    #[default]
    Moderate,
    /// Use all of the tolerance.
    Relaxed,
}

impl FlexibilityMode {
    /// Extra days of cycle granted from `tolerance_days`.
    pub fn slack(self, tolerance_days: u32) -> u32 {
        match self {
            FlexibilityMode::Strict => 0,
            FlexibilityMode::Moderate => tolerance_days / 2,
            FlexibilityMode::Relaxed => tolerance_days,
        }
    }
}

impl std::str::FromStr for FlexibilityMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(FlexibilityMode::Strict),
            "moderate" => Ok(FlexibilityMode::Moderate),
            "relaxed" => Ok(FlexibilityMode::Relaxed),
            other => Err(Error::InvalidSettings(format!(
                "unknown flexibility mode '{other}' (expected strict, moderate or relaxed)"
            ))),
        }
    }
}

/// Immutable per computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Days after a wash until peak quality.
    pub days_to_ideal: u32,
    /// Days the peak holds. Must be at least 1.
    pub style_duration: u32,
    /// Extra slack before a wash is overdue.
    pub tolerance_days: u32,
    #[serde(default)]
    pub flexibility_mode: FlexibilityMode,
    /// Humidity percentage above which degradation accelerates.
    #[serde(default = "default_humidity_threshold")]
    pub humidity_threshold: f64,
    /// Usual style, used for weather sensitivity when a wash entry names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hairstyle: Option<Hairstyle>,
}

fn default_humidity_threshold() -> f64 {
    DEFAULT_HUMIDITY_THRESHOLD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days_to_ideal: 2,
            style_duration: 3,
            tolerance_days: 2,
            flexibility_mode: FlexibilityMode::Moderate,
            humidity_threshold: DEFAULT_HUMIDITY_THRESHOLD,
            hairstyle: None,
        }
    }
}

impl Settings {
    pub fn new(days_to_ideal: u32, style_duration: u32, tolerance_days: u32) -> Self {
        Self {
            days_to_ideal,
            style_duration,
            tolerance_days,
            ..Self::default()
        }
    }

    pub fn with_flexibility(mut self, mode: FlexibilityMode) -> Self {
        self.flexibility_mode = mode;
        self
    }

    pub fn with_humidity_threshold(mut self, threshold: f64) -> Self {
        self.humidity_threshold = threshold;
        self
    }

    pub fn with_hairstyle(mut self, hairstyle: Hairstyle) -> Self {
        self.hairstyle = Some(hairstyle);
        self
    }

    /// Reject settings that leave the decay curve undefined.
    pub fn validate(&self) -> Result<()> {
        if self.style_duration < 1 {
            return Err(Error::InvalidSettings(format!(
                "styleDuration must be at least 1 (got {})",
                self.style_duration
            )));
        }
        if !self.humidity_threshold.is_finite()
            || !(0.0..=100.0).contains(&self.humidity_threshold)
        {
            return Err(Error::InvalidSettings(format!(
                "humidityThreshold must be within 0..=100 (got {})",
                self.humidity_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn zero_style_duration_is_rejected() {
        let err = Settings::new(2, 0, 1).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        assert!(Settings::default().with_humidity_threshold(140.0).validate().is_err());
        assert!(Settings::default().with_humidity_threshold(f64::NAN).validate().is_err());
    }

    #[test]
    fn flexibility_slack() {
        assert_eq!(FlexibilityMode::Strict.slack(5), 0);
        assert_eq!(FlexibilityMode::Moderate.slack(5), 2);
        assert_eq!(FlexibilityMode::Relaxed.slack(5), 5);
        assert_eq!("Relaxed".parse::<FlexibilityMode>().unwrap(), FlexibilityMode::Relaxed);
        assert!("loose".parse::<FlexibilityMode>().is_err());
    }

    #[test]
    fn host_json_uses_camel_case_and_optional_threshold() {
        let json = r#"{"daysToIdeal":2,"styleDuration":3,"toleranceDays":4,"flexibilityMode":"relaxed"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.tolerance_days, 4);
        assert_eq!(settings.flexibility_mode, FlexibilityMode::Relaxed);
        assert_eq!(settings.humidity_threshold, 80.0);
        assert!(settings.hairstyle.is_none());
    }

    #[test]
    fn negative_days_to_ideal_does_not_deserialize() {
        let json = r#"{"daysToIdeal":-1,"styleDuration":3,"toleranceDays":0}"#;
        assert!(serde_json::from_str::<Settings>(json).is_err());
    }
}
