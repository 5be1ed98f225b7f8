//! Weather-aware wash date shifting.
//!
//! Washing on a rainy day, or the day before one, is disfavored. Avoidance is
//! best-effort: when nothing nearby is dry the target date stands.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::add_days;
use crate::weather::{WeatherLookup, weather_on};

/// Precipitation probability above which a day counts as rainy.
pub const RAIN_THRESHOLD: f64 = 50.0;

/// Probe order around the target: earlier first, widening to three days.
pub const SHIFT_OFFSETS: [i64; 6] = [-1, 1, -2, 2, -3, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftedDate {
    pub date: NaiveDate,
    pub shifted: bool,
}

pub fn is_rainy<W: WeatherLookup + ?Sized>(date: NaiveDate, weather: &W) -> bool {
    weather_on(weather, date).is_some_and(|w| w.precipitation_probability > RAIN_THRESHOLD)
}

/// Neither the day itself nor the following day is rainy.
pub fn is_safe_wash_date<W: WeatherLookup + ?Sized>(date: NaiveDate, weather: &W) -> bool {
    !is_rainy(date, weather) && !is_rainy(add_days(date, 1), weather)
}

/// Nearest safe date to `target`, never earlier than `min_date`.
pub fn find_safe_date<W: WeatherLookup + ?Sized>(
    target: NaiveDate,
    min_date: NaiveDate,
    weather: &W,
) -> ShiftedDate {
    if is_safe_wash_date(target, weather) {
        return ShiftedDate {
            date: target,
            shifted: false,
        };
    }

    for offset in SHIFT_OFFSETS {
        let candidate = add_days(target, offset);
        if candidate < min_date {
            continue;
        }
        if is_safe_wash_date(candidate, weather) {
            debug!(%target, %candidate, offset, "shifted wash date to avoid rain");
            return ShiftedDate {
                date: candidate,
                shifted: true,
            };
        }
    }

    debug!(%target, "no dry alternative within three days; keeping target");
    ShiftedDate {
        date: target,
        shifted: false,
    }
}
