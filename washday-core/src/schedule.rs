//! Top-level schedule computation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cycle::back_calculate;
use crate::date::add_days;
use crate::error::Result;
use crate::event::{TargetEvent, important_between};
use crate::settings::Settings;
use crate::suggest::suggest_wash_days;
use crate::timeline::{DayInfo, build_day_info_map};
use crate::wash::{CoverageIndex, WashDay, WashKind, WashLog};
use crate::weather::WeatherLookup;

/// Days after `today` covered by the timeline and suggestions.
pub const SCHEDULE_HORIZON_DAYS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Manual, back-calculated and suggested washes in date order.
    pub washes: Vec<WashDay>,
    /// One record per day in `[today, today + 60]`.
    pub days: BTreeMap<NaiveDate, DayInfo>,
}

impl ScheduleResult {
    /// Engine-owned entries; recomputed on every call.
    pub fn suggested(&self) -> impl Iterator<Item = &WashDay> {
        self.washes.iter().filter(|w| w.kind == WashKind::Suggested)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayInfo> {
        self.days.get(&date)
    }
}

/// Merge manual washes with event plans and cadence suggestions, then build
/// the 60-day timeline from `today`.
///
/// Manual entries sharing a date are resolved last-write-wins. Engine entries
/// are only added where no wash already sits within one day.
pub fn compute_schedule<W: WeatherLookup + ?Sized>(
    events: &[TargetEvent],
    manual: &[WashDay],
    settings: &Settings,
    weather: &W,
    today: NaiveDate,
) -> Result<ScheduleResult> {
    settings.validate()?;
    let range_end = add_days(today, SCHEDULE_HORIZON_DAYS);

    let mut washes = WashLog::from_entries(manual.iter().cloned()).to_vec();
    let mut claimed = CoverageIndex::from_washes(&washes);

    let upcoming = important_between(events, Some(add_days(today, 1)), None);
    for event in upcoming {
        let ideal_wash = add_days(event.date, -i64::from(settings.days_to_ideal));
        if ideal_wash < today || claimed.covers(ideal_wash) {
            continue;
        }
        let plan = back_calculate(ideal_wash, today, settings)?;
        debug!(event = %event.title, washes = plan.len(), "merging back-calculated plan");
        merge_uncovered(&mut washes, &mut claimed, plan);
    }

    let suggestions = suggest_wash_days(events, &washes, settings, weather, today, range_end)?;
    merge_uncovered(&mut washes, &mut claimed, suggestions);

    washes.sort_by_key(|w| w.date);

    let days = build_day_info_map(today, range_end, &washes, events, settings, weather);
    info!(
        %today,
        washes = washes.len(),
        suggested = washes.iter().filter(|w| w.kind == WashKind::Suggested).count(),
        "computed wash schedule"
    );

    Ok(ScheduleResult { washes, days })
}

fn merge_uncovered(
    washes: &mut Vec<WashDay>,
    claimed: &mut CoverageIndex,
    incoming: Vec<WashDay>,
) {
    for wash in incoming {
        if claimed.covers(wash.date) {
            continue;
        }
        claimed.claim(wash.date);
        washes.push(wash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::Phase;
    use crate::weather::NoWeather;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn day(n: i64) -> NaiveDate {
        add_days(today(), n)
    }

    #[test]
    fn timeline_spans_sixty_days() {
        let out = compute_schedule(&[], &[], &Settings::default(), &NoWeather, today()).unwrap();
        assert_eq!(out.days.len(), 61);
        assert!(out.day(day(60)).is_some());
        assert!(out.day(day(61)).is_none());
    }

    #[test]
    fn manual_duplicates_resolve_last_write_wins() {
        let manual = [
            WashDay::scheduled(day(0)),
            WashDay::completed(day(0)).with_reason("Washed today"),
        ];
        let out = compute_schedule(&[], &manual, &Settings::default(), &NoWeather, today()).unwrap();
        let on_today: Vec<_> = out.washes.iter().filter(|w| w.date == day(0)).collect();
        assert_eq!(on_today.len(), 1);
        assert_eq!(on_today[0].kind, WashKind::Completed);
        assert_eq!(out.days[&day(0)].wash_kind, Some(WashKind::Completed));
    }

    #[test]
    fn event_plan_is_back_calculated() {
        let s = Settings::default();
        // cycle 6; event on day 30 -> target wash on day 28
        let events = [TargetEvent::new("e", day(30), "Interview").important()];
        let out = compute_schedule(&events, &[], &s, &NoWeather, today()).unwrap();
        let dates: Vec<_> = out.washes.iter().map(|w| w.date).collect();
        assert!(dates.contains(&day(28)));
        assert!(dates.contains(&day(22)));
        assert!(dates.contains(&day(4)));
        assert!(dates.contains(&day(0)));
        assert_eq!(out.days[&day(30)].phase, Phase::Ideal);
        assert_eq!(out.days[&day(30)].events.len(), 1);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let s = Settings::new(2, 0, 0);
        assert!(compute_schedule(&[], &[], &s, &NoWeather, today()).is_err());
    }
}
