//! Dates the user wants to look good for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    /// Only important events drive wash planning; the rest are annotations.
    #[serde(default)]
    pub important: bool,
}

impl TargetEvent {
    pub fn new(id: impl Into<String>, date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date,
            title: title.into(),
            important: false,
        }
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

/// Important events with `from <= date <= to` (either bound optional), in
/// date order. Ties keep input order.
pub fn important_between(
    events: &[TargetEvent],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<&TargetEvent> {
    let mut out: Vec<&TargetEvent> = events
        .iter()
        .filter(|e| e.important)
        .filter(|e| from.is_none_or(|f| e.date >= f))
        .filter(|e| to.is_none_or(|t| e.date <= t))
        .collect();
    out.sort_by_key(|e| e.date);
    out
}
