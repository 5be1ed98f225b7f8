//! Wash entries, the manual wash log and the near-date coverage rule.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::add_days;
use crate::hairstyle::Hairstyle;

/// Two washes within this many days of each other count as the same wash.
pub const COVERAGE_TOLERANCE_DAYS: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WashKind {
    /// Logged by the user; authoritative.
    Completed,
    /// Planned by the user; authoritative.
    Scheduled,
    /// Produced by the engine on every run and never persisted by it.
    Suggested,
}

impl WashKind {
    pub fn is_manual(self) -> bool {
        !matches!(self, WashKind::Suggested)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashDay {
    pub date: NaiveDate,
    #[serde(rename = "type", alias = "kind")]
    pub kind: WashKind,
    /// Advisory text shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hairstyle: Option<Hairstyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_to_optimal: Option<u32>,
}

impl WashDay {
    pub fn new(date: NaiveDate, kind: WashKind) -> Self {
        Self {
            date,
            kind,
            reason: None,
            hairstyle: None,
            days_to_optimal: None,
        }
    }

    pub fn completed(date: NaiveDate) -> Self {
        Self::new(date, WashKind::Completed)
    }

    pub fn scheduled(date: NaiveDate) -> Self {
        Self::new(date, WashKind::Scheduled)
    }

    pub fn suggested(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self::new(date, WashKind::Suggested).with_reason(reason)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Record the style put in at this wash; its days-to-optimal default
    /// applies unless an explicit value is set.
    pub fn with_hairstyle(mut self, hairstyle: Hairstyle) -> Self {
        self.hairstyle = Some(hairstyle);
        self
    }

    pub fn with_days_to_optimal(mut self, days: u32) -> Self {
        self.days_to_optimal = Some(days);
        self
    }

    pub fn reason_or_default(&self) -> &str {
        self.reason.as_deref().unwrap_or("")
    }
}

/// Dates already claimed by a wash, for the within-one-day coverage test.
#[derive(Debug, Clone, Default)]
pub struct CoverageIndex {
    dates: BTreeSet<NaiveDate>,
}

impl CoverageIndex {
    pub fn from_washes<'a>(washes: impl IntoIterator<Item = &'a WashDay>) -> Self {
        Self {
            dates: washes.into_iter().map(|w| w.date).collect(),
        }
    }

    pub fn claim(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    /// Some claimed date lies within [`COVERAGE_TOLERANCE_DAYS`] of `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        let lo = add_days(date, -COVERAGE_TOLERANCE_DAYS);
        let hi = add_days(date, COVERAGE_TOLERANCE_DAYS);
        self.dates.range(lo..=hi).next().is_some()
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        self.dates.iter().next_back().copied()
    }
}

/// User-entered washes keyed by date. Writing a date that already has an
/// entry replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WashLog {
    entries: BTreeMap<NaiveDate, WashDay>,
}

impl WashLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from host input, resolving duplicate dates last-write-wins.
    pub fn from_entries(entries: impl IntoIterator<Item = WashDay>) -> Self {
        let mut log = Self::new();
        for entry in entries {
            log.upsert(entry);
        }
        log
    }

    /// Insert or replace; returns the entry that was replaced.
    pub fn upsert(&mut self, wash: WashDay) -> Option<WashDay> {
        self.entries.insert(wash.date, wash)
    }

    pub fn remove(&mut self, date: NaiveDate) -> Option<WashDay> {
        self.entries.remove(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&WashDay> {
        self.entries.get(&date)
    }

    pub fn mark_today(&mut self, today: NaiveDate) {
        self.upsert(WashDay::completed(today).with_reason("Washed today"));
    }

    pub fn schedule(&mut self, date: NaiveDate) {
        self.upsert(WashDay::scheduled(date).with_reason("Manually scheduled"));
    }

    pub fn mark_completed(&mut self, date: NaiveDate) {
        self.upsert(WashDay::completed(date).with_reason("Completed wash"));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = &WashDay> {
        self.entries.values()
    }

    pub fn to_vec(&self) -> Vec<WashDay> {
        self.entries.values().cloned().collect()
    }
}
