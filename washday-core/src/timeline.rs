//! Per-day quality timeline.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::date::{days_inclusive, diff_days};
use crate::event::TargetEvent;
use crate::hairstyle::Hairstyle;
use crate::quality::{Phase, StyleContext, phase, quality_score};
use crate::settings::Settings;
use crate::wash::{WashDay, WashKind};
use crate::weather::{WeatherDay, WeatherLookup, weather_on};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayInfo {
    pub date: NaiveDate,
    /// `None` when no wash exists on or before this day.
    pub days_since_last_wash: Option<u32>,
    pub quality_score: u8,
    pub weather: Option<WeatherDay>,
    pub is_wash_day: bool,
    /// Present iff `is_wash_day`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wash_kind: Option<WashKind>,
    pub is_ideal_window: bool,
    pub is_good_window: bool,
    /// Every event on this date, in input order.
    pub events: Vec<TargetEvent>,
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_wash_hairstyle: Option<Hairstyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_wash_days_to_optimal: Option<u32>,
}

/// Day records for every date in `[start, end]`.
///
/// `washes` need not be sorted. For each day the latest wash on or before it
/// anchors the decay curve; later washes never leak backwards.
pub fn build_day_info_map<W: WeatherLookup + ?Sized>(
    start: NaiveDate,
    end: NaiveDate,
    washes: &[WashDay],
    events: &[TargetEvent],
    settings: &Settings,
    weather: &W,
) -> BTreeMap<NaiveDate, DayInfo> {
    let mut sorted: Vec<&WashDay> = washes.iter().collect();
    sorted.sort_by_key(|w| w.date);

    days_inclusive(start, end)
        .map(|date| {
            let info = day_info(date, &sorted, events, settings, weather);
            trace!(%date, phase = %info.phase, score = info.quality_score, "day info");
            (date, info)
        })
        .collect()
}

fn day_info<W: WeatherLookup + ?Sized>(
    date: NaiveDate,
    sorted: &[&WashDay],
    events: &[TargetEvent],
    settings: &Settings,
    weather: &W,
) -> DayInfo {
    let weather = weather_on(weather, date).cloned();
    let day_events: Vec<TargetEvent> = events.iter().filter(|e| e.date == date).cloned().collect();

    // Entries at or before `date` form a prefix of the sorted list.
    let upto = sorted.partition_point(|w| w.date <= date);
    let last = upto.checked_sub(1).map(|i| sorted[i]);

    let days_since = last.map(|w| u32::try_from(diff_days(date, w.date)).unwrap_or(u32::MAX));
    let todays_wash = last.filter(|w| w.date == date);

    let (quality_score, phase) = match (days_since, last) {
        (Some(d), Some(wash)) => (
            quality_score(d, settings, weather.as_ref(), StyleContext::from_wash(wash)),
            phase(d, settings),
        ),
        _ => (0, Phase::None),
    };

    DayInfo {
        date,
        days_since_last_wash: days_since,
        quality_score,
        weather,
        is_wash_day: todays_wash.is_some(),
        wash_kind: todays_wash.map(|w| w.kind),
        is_ideal_window: phase.is_ideal(),
        is_good_window: phase.is_good(),
        events: day_events,
        phase,
        last_wash_hairstyle: last.and_then(|w| w.hairstyle),
        last_wash_days_to_optimal: last.and_then(|w| w.days_to_optimal),
    }
}
