//! Helpers for summarizing the upcoming washes.

use chrono::NaiveDate;

use crate::date::{add_days, diff_days};
use crate::settings::Settings;
use crate::wash::WashDay;

/// Washes on or after `today`, in date order, at most `limit`.
pub fn upcoming(washes: &[WashDay], today: NaiveDate, limit: usize) -> Vec<&WashDay> {
    let mut out: Vec<&WashDay> = washes.iter().filter(|w| w.date >= today).collect();
    out.sort_by_key(|w| w.date);
    out.truncate(limit);
    out
}

/// First and last day of peak quality after `wash`.
pub fn ideal_window_for(wash: &WashDay, settings: &Settings) -> (NaiveDate, NaiveDate) {
    let start = add_days(wash.date, i64::from(settings.days_to_ideal));
    let end = add_days(start, i64::from(settings.style_duration) - 1);
    (start, end)
}

/// The next wash comes later than the longest tolerable cycle.
pub fn gap_warning(current: &WashDay, next: &WashDay, settings: &Settings) -> bool {
    let max_cycle = i64::from(settings.days_to_ideal)
        + i64::from(settings.style_duration)
        + i64::from(settings.tolerance_days);
    diff_days(next.date, current.date) > max_cycle
}
