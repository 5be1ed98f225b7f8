//! Hairstyles and how strongly weather wears them down.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSensitivity {
    /// Heat-styled, straight looks that frizz quickly.
    High,
    Medium,
    /// Curls and braids hold up in humidity.
    Low,
}

impl WeatherSensitivity {
    /// Factor applied to every humidity/rain penalty.
    pub fn multiplier(self) -> f64 {
        match self {
            WeatherSensitivity::High => 1.8,
            WeatherSensitivity::Medium => 1.0,
            WeatherSensitivity::Low => 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hairstyle {
    #[serde(rename = "Blowout/Straightening")]
    Blowout,
    #[serde(rename = "Curls (diffused)")]
    CurlsDiffused,
    #[serde(rename = "Curls (air-dried)")]
    CurlsAirDried,
    #[serde(rename = "Waves")]
    Waves,
    #[serde(rename = "Dutch braids")]
    DutchBraids,
    #[serde(rename = "French braids")]
    FrenchBraids,
    #[serde(rename = "Twist-out")]
    TwistOut,
    #[serde(rename = "Braid-out")]
    BraidOut,
    #[serde(rename = "Wash & go")]
    WashAndGo,
    #[serde(rename = "Slicked back/updo")]
    SlickedBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HairstyleDefaults {
    pub days_to_optimal: u32,
    pub weather_sensitivity: WeatherSensitivity,
}

impl Hairstyle {
    pub const ALL: [Hairstyle; 10] = [
        Hairstyle::Blowout,
        Hairstyle::CurlsDiffused,
        Hairstyle::CurlsAirDried,
        Hairstyle::Waves,
        Hairstyle::DutchBraids,
        Hairstyle::FrenchBraids,
        Hairstyle::TwistOut,
        Hairstyle::BraidOut,
        Hairstyle::WashAndGo,
        Hairstyle::SlickedBack,
    ];

    pub fn defaults(self) -> HairstyleDefaults {
        use WeatherSensitivity::{High, Low, Medium};
        let (days_to_optimal, weather_sensitivity) = match self {
            Hairstyle::Blowout => (0, High),
            Hairstyle::CurlsDiffused => (1, Low),
            Hairstyle::CurlsAirDried => (2, Low),
            Hairstyle::Waves => (1, Medium),
            Hairstyle::DutchBraids => (1, Low),
            Hairstyle::FrenchBraids => (1, Low),
            Hairstyle::TwistOut => (1, Low),
            Hairstyle::BraidOut => (1, Low),
            Hairstyle::WashAndGo => (0, Medium),
            Hairstyle::SlickedBack => (0, Medium),
        };
        HairstyleDefaults {
            days_to_optimal,
            weather_sensitivity,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Hairstyle::Blowout => "Blowout/Straightening",
            Hairstyle::CurlsDiffused => "Curls (diffused)",
            Hairstyle::CurlsAirDried => "Curls (air-dried)",
            Hairstyle::Waves => "Waves",
            Hairstyle::DutchBraids => "Dutch braids",
            Hairstyle::FrenchBraids => "French braids",
            Hairstyle::TwistOut => "Twist-out",
            Hairstyle::BraidOut => "Braid-out",
            Hairstyle::WashAndGo => "Wash & go",
            Hairstyle::SlickedBack => "Slicked back/updo",
        }
    }

    /// Case-insensitive lookup by display label.
    pub fn from_label(label: &str) -> Option<Hairstyle> {
        let wanted = label.trim();
        Hairstyle::ALL
            .into_iter()
            .find(|h| h.label().eq_ignore_ascii_case(wanted))
    }
}

impl std::fmt::Display for Hairstyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Sensitivity multiplier for an optional hairstyle; no style means baseline 1.0.
pub fn sensitivity_multiplier(hairstyle: Option<Hairstyle>) -> f64 {
    hairstyle
        .map(|h| h.defaults().weather_sensitivity.multiplier())
        .unwrap_or(1.0)
}
