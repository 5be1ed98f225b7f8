//! Plain-text views of a computed schedule.

use std::fmt::Write;

use chrono::NaiveDate;
use washday_core::overview::{gap_warning, ideal_window_for, upcoming};
use washday_core::{
    DayInfo, SCHEDULE_HORIZON_DAYS, ScheduleResult, Settings, WashKind, WeatherLookup, WeatherMap,
    add_days, weather_adjusted_style_duration,
};

/// Number of washes listed in the overview.
pub const OVERVIEW_LIMIT: usize = 6;

fn kind_label(kind: WashKind) -> &'static str {
    match kind {
        WashKind::Completed => "completed",
        WashKind::Scheduled => "scheduled",
        WashKind::Suggested => "suggested",
    }
}

/// Last forecast day, when a forecast was given but stops short of the horizon.
pub fn forecast_ends_early(weather: &WeatherMap, today: NaiveDate) -> Option<NaiveDate> {
    let (_, last) = weather.span()?;
    (last < add_days(today, SCHEDULE_HORIZON_DAYS)).then_some(last)
}

pub fn render_overview<W: WeatherLookup + ?Sized>(
    schedule: &ScheduleResult,
    settings: &Settings,
    weather: &W,
    today: NaiveDate,
) -> String {
    let next = upcoming(&schedule.washes, today, OVERVIEW_LIMIT);
    let mut out = String::new();

    if next.is_empty() {
        out.push_str("No wash schedule yet. Add events or log a wash to get started.\n");
        return out;
    }

    let _ = writeln!(out, "# Upcoming wash schedule (from {today})\n");
    for (i, wash) in next.iter().enumerate() {
        let (ideal_start, ideal_end) = ideal_window_for(wash, settings);
        let hold = weather_adjusted_style_duration(wash.date, settings, weather);
        let _ = writeln!(
            out,
            "- {} [{}] {}",
            wash.date.format("%a %Y-%m-%d"),
            kind_label(wash.kind),
            wash.reason_or_default()
        );
        let _ = writeln!(
            out,
            "    ideal {ideal_start} .. {ideal_end} (style holds ~{hold} day{})",
            if hold == 1 { "" } else { "s" }
        );
        if let Some(info) = schedule.day(wash.date).and_then(|d| d.weather.as_ref()) {
            let _ = writeln!(
                out,
                "    weather: humidity {:.0}% | rain {:.0}%",
                info.humidity, info.precipitation_probability
            );
        }
        if let Some(following) = next.get(i + 1) {
            if gap_warning(wash, following, settings) {
                let _ = writeln!(
                    out,
                    "    ! long gap before {}; hair may be past its best",
                    following.date
                );
            }
        }
    }
    out
}

fn day_line(info: &DayInfo) -> String {
    let since = info
        .days_since_last_wash
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "{} {:>3} {:<9} d+{:<3}",
        info.date, info.quality_score, info.phase, since
    );
    if let Some(kind) = info.wash_kind {
        let _ = write!(line, " wash:{}", kind_label(kind));
    }
    if let Some(w) = &info.weather {
        let _ = write!(line, " hum:{:.0} rain:{:.0}", w.humidity, w.precipitation_probability);
    }
    for event in &info.events {
        let marker = if event.important { "*" } else { "" };
        let _ = write!(line, " [{marker}{}]", event.title);
    }
    line
}

pub fn render_days(schedule: &ScheduleResult) -> String {
    let mut out = String::from("date       score phase     since\n");
    for info in schedule.days.values() {
        out.push_str(&day_line(info));
        out.push('\n');
    }
    out
}
