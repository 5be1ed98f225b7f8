//! "Today" as a civil date in the user's timezone.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Calendar date of `now` in an IANA zone like "America/Chicago".
pub fn local_date(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// An explicit `--today` wins; otherwise the wall-clock date in `tz`.
pub fn resolve_today(explicit: Option<&str>, tz: &str) -> Result<NaiveDate> {
    match explicit {
        Some(s) => washday_core::parse_date(s).with_context(|| format!("--today {s}")),
        None => local_date(Utc::now(), tz),
    }
}
