//! Daily weather observations supplied by the host.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDay {
    pub date: NaiveDate,
    /// Relative humidity, 0-100.
    pub humidity: f64,
    /// Chance of precipitation, 0-100.
    pub precipitation_probability: f64,
    /// Celsius.
    pub temperature_min: f64,
    /// Celsius.
    pub temperature_max: f64,
}

impl WeatherDay {
    pub fn new(date: NaiveDate, humidity: f64, precipitation_probability: f64) -> Self {
        Self {
            date,
            humidity,
            precipitation_probability,
            temperature_min: 0.0,
            temperature_max: 0.0,
        }
    }

    pub fn with_temperatures(mut self, min: f64, max: f64) -> Self {
        self.temperature_min = min;
        self.temperature_max = max;
        self
    }

    /// Percentages are finite and within 0..=100.
    pub fn is_well_formed(&self) -> bool {
        let pct = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        pct(self.humidity) && pct(self.precipitation_probability)
    }
}

/// Read-only date → weather lookup.
///
/// Implementations may hold anything; callers go through [`weather_on`], which
/// drops malformed records so they behave like missing data.
pub trait WeatherLookup {
    fn get(&self, date: NaiveDate) -> Option<&WeatherDay>;
}

/// Weather for `date`, or `None` when missing or malformed.
pub fn weather_on<W: WeatherLookup + ?Sized>(lookup: &W, date: NaiveDate) -> Option<&WeatherDay> {
    lookup.get(date).filter(|w| w.is_well_formed())
}

/// Ordered weather snapshot keyed by date. Later records for a date replace
/// earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherMap {
    days: BTreeMap<NaiveDate, WeatherDay>,
}

impl WeatherMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: WeatherDay) {
        self.days.insert(day.date, day);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeatherDay> {
        self.days.values()
    }

    /// First and last covered dates.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.days.keys().next()?;
        let last = self.days.keys().next_back()?;
        Some((*first, *last))
    }
}

impl FromIterator<WeatherDay> for WeatherMap {
    fn from_iter<I: IntoIterator<Item = WeatherDay>>(iter: I) -> Self {
        let mut map = WeatherMap::new();
        for day in iter {
            map.insert(day);
        }
        map
    }
}

impl WeatherLookup for WeatherMap {
    fn get(&self, date: NaiveDate) -> Option<&WeatherDay> {
        self.days.get(&date)
    }
}

impl WeatherLookup for BTreeMap<NaiveDate, WeatherDay> {
    fn get(&self, date: NaiveDate) -> Option<&WeatherDay> {
        BTreeMap::get(self, &date)
    }
}

impl WeatherLookup for HashMap<NaiveDate, WeatherDay> {
    fn get(&self, date: NaiveDate) -> Option<&WeatherDay> {
        HashMap::get(self, &date)
    }
}

/// No forecast at all; every day degrades to `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWeather;

impl WeatherLookup for NoWeather {
    fn get(&self, _date: NaiveDate) -> Option<&WeatherDay> {
        None
    }
}
