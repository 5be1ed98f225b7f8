//! Suggested washes: event targets first, then cadence gap filling.

use chrono::NaiveDate;
use tracing::debug;

use crate::cycle::effective_cycle_length;
use crate::date::{add_days, diff_days};
use crate::error::Result;
use crate::event::{TargetEvent, important_between};
use crate::settings::Settings;
use crate::shift::{ShiftedDate, find_safe_date};
use crate::wash::{CoverageIndex, WashDay};
use crate::weather::WeatherLookup;

/// Event wash targets closer than this are merged into one wash.
const CONSOLIDATE_WITHIN_DAYS: i64 = 2;

const SHIFTED_SUFFIX: &str = " (shifted to avoid rain)";
const MAINTENANCE_REASON: &str = "Maintenance wash";

#[derive(Debug, Clone, PartialEq, Eq)]
struct WashTarget {
    date: NaiveDate,
    reason: String,
}

/// Propose washes for important events in `[today, range_end]` and keep the
/// regular cadence going until `range_end`.
///
/// `existing` is never modified; only new `suggested` entries are returned.
/// Nothing is proposed within one day of an existing or already proposed wash.
pub fn suggest_wash_days<W: WeatherLookup + ?Sized>(
    events: &[TargetEvent],
    existing: &[WashDay],
    settings: &Settings,
    weather: &W,
    today: NaiveDate,
    range_end: NaiveDate,
) -> Result<Vec<WashDay>> {
    settings.validate()?;
    let mut claimed = CoverageIndex::from_washes(existing);
    let mut suggestions = Vec::new();

    for target in consolidate(event_targets(events, settings, today, range_end)) {
        if claimed.covers(target.date) {
            continue;
        }
        let best = find_safe_date(target.date, today, weather);
        if claimed.covers(best.date) {
            continue;
        }
        let reason = with_shift_note(target.reason, best);
        debug!(date = %best.date, %reason, "suggesting event wash");
        claimed.claim(best.date);
        suggestions.push(WashDay::suggested(best.date, reason));
    }

    fill_cadence_gaps(&mut claimed, &mut suggestions, settings, weather, today, range_end);

    Ok(suggestions)
}

/// Ideal wash date per important event, dropping those already in the past.
fn event_targets(
    events: &[TargetEvent],
    settings: &Settings,
    today: NaiveDate,
    range_end: NaiveDate,
) -> Vec<WashTarget> {
    important_between(events, Some(today), Some(range_end))
        .into_iter()
        .filter_map(|event| {
            let date = add_days(event.date, -i64::from(settings.days_to_ideal));
            (date >= today).then(|| WashTarget {
                date,
                reason: format!("Wash for \"{}\" on {}", event.title, event.date),
            })
        })
        .collect()
}

/// Merge targets within two days of an earlier kept target.
fn consolidate(targets: Vec<WashTarget>) -> Vec<WashTarget> {
    let mut merged: Vec<WashTarget> = Vec::new();
    for target in targets {
        let near = merged
            .iter()
            .position(|m| diff_days(m.date, target.date).abs() <= CONSOLIDATE_WITHIN_DAYS);
        match near {
            Some(i) => {
                let existing = &mut merged[i];
                existing.reason.push_str(" & ");
                existing.reason.push_str(&target.reason);
            }
            None => merged.push(target),
        }
    }
    merged
}

/// Walk forward from the latest claimed wash in cycle-length steps.
///
/// An overdue history keeps its cadence: steps that land before `today` are
/// still emitted so later washes stay in phase. After a history, the next step
/// starts from wherever the shifter placed the wash. With nothing claimed the
/// walk starts at `today` and advances from the unshifted candidate.
fn fill_cadence_gaps<W: WeatherLookup + ?Sized>(
    claimed: &mut CoverageIndex,
    suggestions: &mut Vec<WashDay>,
    settings: &Settings,
    weather: &W,
    today: NaiveDate,
    range_end: NaiveDate,
) {
    let cycle = i64::from(effective_cycle_length(settings)).max(1);
    let mut cursor = claimed.latest();
    let mut candidate = match cursor {
        Some(last) => add_days(last, cycle),
        None => today,
    };

    while candidate <= range_end {
        let best = find_safe_date(candidate, today, weather);
        if !claimed.covers(best.date) {
            let reason = with_shift_note(MAINTENANCE_REASON.to_string(), best);
            debug!(date = %best.date, %reason, "suggesting maintenance wash");
            claimed.claim(best.date);
            suggestions.push(WashDay::suggested(best.date, reason));
        }

        let anchor = match cursor {
            // a backward shift must not stall the walk
            Some(prev) if best.date > prev => best.date,
            _ => candidate,
        };
        if cursor.is_some() {
            cursor = Some(anchor);
        }
        candidate = add_days(anchor, cycle);
    }
}

fn with_shift_note(reason: String, best: ShiftedDate) -> String {
    if best.shifted {
        reason + SHIFTED_SUFFIX
    } else {
        reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FlexibilityMode;
    use crate::wash::WashKind;
    use crate::weather::{NoWeather, WeatherDay, WeatherMap};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    }

    fn day(n: i64) -> NaiveDate {
        add_days(today(), n)
    }

    fn strict(t: u32, s: u32) -> Settings {
        Settings::new(t, s, 0).with_flexibility(FlexibilityMode::Strict)
    }

    #[test]
    fn cadence_starts_today_when_nothing_is_known() {
        let out = suggest_wash_days(&[], &[], &strict(2, 3), &NoWeather, today(), day(20)).unwrap();
        let dates: Vec<_> = out.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![day(0), day(5), day(10), day(15), day(20)]);
        assert!(out.iter().all(|w| w.kind == WashKind::Suggested));
        assert!(out.iter().all(|w| w.reason_or_default() == "Maintenance wash"));
    }

    #[test]
    fn cadence_continues_from_latest_wash() {
        let existing = [WashDay::completed(day(0))];
        let out =
            suggest_wash_days(&[], &existing, &strict(2, 3), &NoWeather, today(), day(12)).unwrap();
        let dates: Vec<_> = out.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![day(5), day(10)]);
    }

    #[test]
    fn overdue_cadence_keeps_its_phase() {
        let existing = [WashDay::completed(day(-20))];
        let out =
            suggest_wash_days(&[], &existing, &strict(2, 3), &NoWeather, today(), day(6)).unwrap();
        let dates: Vec<_> = out.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![day(-15), day(-10), day(-5), day(0), day(5)]);
    }

    #[test]
    fn cadence_without_history_ignores_shifts() {
        let weather: WeatherMap = (-1..=21)
            .map(|i| WeatherDay::new(day(i), 40.0, if i == 0 { 80.0 } else { 10.0 }))
            .collect();
        let out = suggest_wash_days(&[], &[], &strict(2, 3), &weather, today(), day(20)).unwrap();
        let dates: Vec<_> = out.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![day(1), day(5), day(10), day(15), day(20)]);
        assert!(out[0].reason_or_default().ends_with("(shifted to avoid rain)"));
        assert_eq!(out[1].reason_or_default(), "Maintenance wash");
    }

    #[test]
    fn event_wash_lands_days_to_ideal_before() {
        let events = [TargetEvent::new("e1", day(10), "Wedding").important()];
        let out =
            suggest_wash_days(&events, &[], &strict(2, 3), &NoWeather, today(), day(10)).unwrap();
        let wedding = out.iter().find(|w| w.date == day(8)).unwrap();
        assert_eq!(
            wedding.reason_or_default(),
            format!("Wash for \"Wedding\" on {}", day(10))
        );
    }

    #[test]
    fn unimportant_and_past_events_are_ignored() {
        let events = [
            TargetEvent::new("e1", day(10), "Coffee"),
            TargetEvent::new("e2", day(-3), "Old party").important(),
            // ideal wash date would be yesterday
            TargetEvent::new("e3", day(1), "Too soon").important(),
        ];
        let existing = [WashDay::completed(day(0))];
        let out =
            suggest_wash_days(&events, &existing, &strict(2, 30), &NoWeather, today(), day(20)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn close_events_are_consolidated() {
        let events = [
            TargetEvent::new("a", day(10), "Dinner").important(),
            TargetEvent::new("b", day(12), "Gala").important(),
        ];
        let out = suggest_wash_days(
            &events,
            &[WashDay::completed(day(0))],
            &strict(2, 30),
            &NoWeather,
            today(),
            day(20),
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, day(8));
        let reason = out[0].reason_or_default();
        assert!(reason.contains("Dinner") && reason.contains(" & ") && reason.contains("Gala"));
    }

    #[test]
    fn covered_targets_are_skipped() {
        let events = [TargetEvent::new("a", day(10), "Dinner").important()];
        let existing = [WashDay::completed(day(0)), WashDay::scheduled(day(9))];
        let out =
            suggest_wash_days(&events, &existing, &strict(2, 30), &NoWeather, today(), day(20)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn rainy_target_is_shifted_and_annotated() {
        let weather: WeatherMap = (0..30)
            .map(|i| WeatherDay::new(day(i), 50.0, if i == 8 { 80.0 } else { 5.0 }))
            .collect();
        let events = [TargetEvent::new("a", day(10), "Dinner").important()];
        let out = suggest_wash_days(
            &events,
            &[WashDay::completed(day(0))],
            &strict(2, 30),
            &weather,
            today(),
            day(20),
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        // day 7 is the day before rain, day 9 is the first safe probe
        assert_eq!(out[0].date, day(9));
        assert!(out[0].reason_or_default().ends_with("(shifted to avoid rain)"));
    }

    #[test]
    fn shifted_maintenance_carries_forward() {
        let weather: WeatherMap = (0..30)
            .map(|i| WeatherDay::new(day(i), 50.0, if i == 5 { 80.0 } else { 5.0 }))
            .collect();
        let existing = [WashDay::completed(day(0))];
        let out =
            suggest_wash_days(&[], &existing, &strict(2, 3), &weather, today(), day(12)).unwrap();
        let dates: Vec<_> = out.iter().map(|w| w.date).collect();
        // 5 is rainy, 4 is the day before rain, 6 is safe; next from 6 is 11
        assert_eq!(dates, vec![day(6), day(11)]);
        assert!(out[0].reason_or_default().contains("shifted"));
    }

    #[test]
    fn invalid_settings_surface_as_error() {
        let s = Settings::new(2, 0, 0);
        assert!(suggest_wash_days(&[], &[], &s, &NoWeather, today(), day(10)).is_err());
    }
}
