//! Decay curve, weather penalty and phase classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::add_days;
use crate::hairstyle::{Hairstyle, sensitivity_multiplier};
use crate::settings::Settings;
use crate::wash::WashDay;
use crate::weather::{WeatherDay, WeatherLookup, weather_on};

/// Humidity above this (but at or below the user threshold) still costs a little.
const MILD_HUMIDITY: f64 = 60.0;
const MILD_HUMIDITY_RATE: f64 = 0.2;
const HIGH_HUMIDITY_RATE: f64 = 0.5;
const RAIN_PENALTY_FROM: f64 = 40.0;
const RAIN_PENALTY_RATE: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Wash,
    Building,
    Ideal,
    Good,
    Declining,
    /// No wash recorded on or before the day.
    None,
}

impl Phase {
    pub fn is_ideal(self) -> bool {
        self == Phase::Ideal
    }

    pub fn is_good(self) -> bool {
        matches!(self, Phase::Ideal | Phase::Good)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Wash => "wash",
            Phase::Building => "building",
            Phase::Ideal => "ideal",
            Phase::Good => "good",
            Phase::Declining => "declining",
            Phase::None => "none",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// The style that was put in at the anchoring wash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleContext {
    pub hairstyle: Option<Hairstyle>,
    /// Explicit days-to-optimal recorded on the wash entry.
    pub days_to_optimal: Option<u32>,
}

impl StyleContext {
    pub fn from_wash(wash: &WashDay) -> Self {
        Self {
            hairstyle: wash.hairstyle,
            days_to_optimal: wash.days_to_optimal,
        }
    }

    /// Entry override, then hairstyle default, then settings.
    fn days_to_ideal(&self, settings: &Settings) -> u32 {
        self.days_to_optimal
            .or_else(|| self.hairstyle.map(|h| h.defaults().days_to_optimal))
            .unwrap_or(settings.days_to_ideal)
    }

    fn sensitivity(&self, settings: &Settings) -> f64 {
        sensitivity_multiplier(self.hairstyle.or(settings.hairstyle))
    }
}

/// Unclamped base curve for `d` days after a wash.
pub fn base_quality(days_since: u32, days_to_ideal: u32, style_duration: u32) -> f64 {
    let d = f64::from(days_since);
    let t = f64::from(days_to_ideal);
    let s = f64::from(style_duration);

    if days_since == 0 {
        50.0
    } else if days_since < days_to_ideal {
        50.0 + 50.0 * d / t.max(1.0)
    } else if days_since < days_to_ideal.saturating_add(style_duration) {
        100.0 - 10.0 * (d - t) / (s - 1.0).max(1.0)
    } else {
        let overtime = d - t - s;
        (90.0 - 20.0 * overtime).max(5.0)
    }
}

/// Points lost to humidity and rain, before sensitivity scaling.
pub fn weather_penalty(weather: &WeatherDay, humidity_threshold: f64) -> f64 {
    let mut penalty = 0.0;
    if weather.humidity > humidity_threshold {
        penalty += (weather.humidity - humidity_threshold) * HIGH_HUMIDITY_RATE;
    } else if weather.humidity > MILD_HUMIDITY {
        penalty += (weather.humidity - MILD_HUMIDITY) * MILD_HUMIDITY_RATE;
    }
    if weather.precipitation_probability > RAIN_PENALTY_FROM {
        penalty += (weather.precipitation_probability - RAIN_PENALTY_FROM) * RAIN_PENALTY_RATE;
    }
    penalty
}

/// Quality score in `0..=100` for a day `days_since` days after a wash.
pub fn quality_score(
    days_since: u32,
    settings: &Settings,
    weather: Option<&WeatherDay>,
    style: StyleContext,
) -> u8 {
    let mut quality = base_quality(
        days_since,
        style.days_to_ideal(settings),
        settings.style_duration,
    );

    if let Some(w) = weather.filter(|w| w.is_well_formed()) {
        quality -= weather_penalty(w, settings.humidity_threshold) * style.sensitivity(settings);
    }

    quality.round().clamp(0.0, 100.0) as u8
}

/// Phase is a function of the day offset only; weather never moves it.
pub fn phase(days_since: u32, settings: &Settings) -> Phase {
    let ideal = settings.days_to_ideal;
    let ideal_end = ideal.saturating_add(settings.style_duration);

    if days_since == 0 {
        Phase::Wash
    } else if days_since < ideal {
        Phase::Building
    } else if days_since < ideal_end {
        Phase::Ideal
    } else if days_since < ideal_end.saturating_add(2) {
        Phase::Good
    } else {
        Phase::Declining
    }
}

/// Style duration shortened by a humid or wet stretch following `start`.
///
/// Over the `days_to_ideal + style_duration` days from `start`, every day with
/// humidity above 70 costs 0.3 and every day with rain chance above 60 costs
/// 0.2; whole days lost come off the duration, never below one.
pub fn weather_adjusted_style_duration<W: WeatherLookup + ?Sized>(
    start: NaiveDate,
    settings: &Settings,
    weather: &W,
) -> u32 {
    let span = settings.days_to_ideal.saturating_add(settings.style_duration);
    let reduction: f64 = (0..i64::from(span))
        .filter_map(|i| weather_on(weather, add_days(start, i)))
        .map(|w| {
            let mut r = 0.0;
            if w.humidity > 70.0 {
                r += 0.3;
            }
            if w.precipitation_probability > 60.0 {
                r += 0.2;
            }
            r
        })
        .sum();

    let lost = reduction.floor() as u32;
    settings.style_duration.saturating_sub(lost).max(1)
}
