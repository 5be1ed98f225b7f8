//! Wash cadence and event-driven back-calculation.

use chrono::NaiveDate;
use tracing::debug;

use crate::date::{add_days, diff_days};
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::wash::WashDay;

/// Upper bound on back-calculation steps (ten years of daily washes).
pub const MAX_BACK_CALC_STEPS: usize = 3660;

/// A chain that starts more than this many days after today gets today as an
/// anchor wash.
const ANCHOR_GAP_DAYS: i64 = 2;

/// Spacing between washes when no event forces otherwise.
pub fn effective_cycle_length(settings: &Settings) -> u32 {
    settings
        .days_to_ideal
        .saturating_add(settings.style_duration)
        .saturating_add(settings.flexibility_mode.slack(settings.tolerance_days))
}

/// Wash dates needed to land on `target` from `today`, oldest first.
///
/// Walks back from `target` one cycle at a time while the previous wash would
/// still fall after `today`. If the earliest date is more than two days out,
/// `today` is prepended as an anchor.
pub fn back_calculate_dates(
    target: NaiveDate,
    today: NaiveDate,
    settings: &Settings,
) -> Result<Vec<NaiveDate>> {
    settings.validate()?;
    let cycle = i64::from(effective_cycle_length(settings));
    if cycle < 1 {
        return Err(Error::InvalidSettings("cycle length must be positive".into()));
    }

    let mut chain = vec![target];
    let mut current = target;
    let mut steps = 0usize;

    loop {
        let prev = add_days(current, -cycle);
        if prev <= today {
            if diff_days(current, today) > ANCHOR_GAP_DAYS {
                chain.push(today);
            }
            break;
        }
        steps += 1;
        if steps > MAX_BACK_CALC_STEPS {
            return Err(Error::InvalidSettings(format!(
                "back-calculation to {target} exceeded {MAX_BACK_CALC_STEPS} steps (cycle {cycle} days)"
            )));
        }
        chain.push(prev);
        current = prev;
    }

    chain.reverse();
    debug!(%target, %today, cycle, washes = chain.len(), "back-calculated wash chain");
    Ok(chain)
}

/// [`back_calculate_dates`] as suggested entries with plan reasons.
pub fn back_calculate(
    target: NaiveDate,
    today: NaiveDate,
    settings: &Settings,
) -> Result<Vec<WashDay>> {
    let dates = back_calculate_dates(target, today, settings)?;
    Ok(dates
        .into_iter()
        .map(|date| {
            let reason = if date == target {
                "Target wash for event"
            } else {
                "Scheduled wash in back-calculated plan"
            };
            WashDay::suggested(date, reason)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FlexibilityMode;
    use crate::wash::WashKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    #[test]
    fn cycle_length_per_flexibility_mode() {
        let base = Settings::new(2, 3, 4);
        assert_eq!(effective_cycle_length(&base.clone().with_flexibility(FlexibilityMode::Strict)), 5);
        assert_eq!(effective_cycle_length(&base.clone().with_flexibility(FlexibilityMode::Moderate)), 7);
        assert_eq!(effective_cycle_length(&base.with_flexibility(FlexibilityMode::Relaxed)), 9);
    }

    #[test]
    fn chain_steps_back_by_cycle() {
        let s = Settings::new(3, 4, 0).with_flexibility(FlexibilityMode::Strict);
        let target = add_days(today(), 30);
        let chain = back_calculate_dates(target, today(), &s).unwrap();
        // 30, 23, 16, 9, 2 days out; the earliest is within two days of today
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.last(), Some(&target));
        assert!(chain.windows(2).all(|w| diff_days(w[1], w[0]) == 7));
        assert_eq!(chain[0], add_days(today(), 2));
    }

    #[test]
    fn distant_first_wash_gets_today_anchor() {
        let s = Settings::new(3, 4, 0).with_flexibility(FlexibilityMode::Strict);
        let target = add_days(today(), 33);
        let chain = back_calculate_dates(target, today(), &s).unwrap();
        // 33, 26, 19, 12, 5 then anchor
        assert_eq!(chain[0], today());
        assert_eq!(chain[1], add_days(today(), 5));
        assert_eq!(chain.len(), 6);
        assert!(chain[1..].windows(2).all(|w| diff_days(w[1], w[0]) == 7));
    }

    #[test]
    fn near_target_is_single_wash() {
        let s = Settings::default();
        let chain = back_calculate_dates(today(), today(), &s).unwrap();
        assert_eq!(chain, vec![today()]);
        let chain = back_calculate_dates(add_days(today(), 2), today(), &s).unwrap();
        assert_eq!(chain, vec![add_days(today(), 2)]);
    }

    #[test]
    fn reasons_mark_target() {
        let s = Settings::new(3, 4, 0).with_flexibility(FlexibilityMode::Strict);
        let target = add_days(today(), 10);
        let washes = back_calculate(target, today(), &s).unwrap();
        assert!(washes.iter().all(|w| w.kind == WashKind::Suggested));
        let last = washes.last().unwrap();
        assert_eq!(last.reason.as_deref(), Some("Target wash for event"));
        assert_eq!(
            washes[0].reason.as_deref(),
            Some("Scheduled wash in back-calculated plan")
        );
    }

    #[test]
    fn pathological_settings_are_rejected() {
        let s = Settings::new(0, 0, 0);
        let err = back_calculate_dates(add_days(today(), 10), today(), &s).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn runaway_chain_hits_ceiling() {
        let s = Settings::new(0, 1, 0).with_flexibility(FlexibilityMode::Strict);
        let target = add_days(today(), 20_000);
        let err = back_calculate_dates(target, today(), &s).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }
}
