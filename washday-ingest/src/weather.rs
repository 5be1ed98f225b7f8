//! Parse daily forecast exports into a [`WeatherMap`].
//!
//! CSV exports carry a header row:
//! date,humidity,precipitation_probability,temperature_min,temperature_max
//!
//! Column order is free; `date` accepts `YYYY-MM-DD`. Rows that fail to parse
//! are skipped so one bad line never blanks a whole forecast.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};
use washday_core::{WeatherDay, WeatherMap};

#[derive(Debug, Deserialize)]
struct WeatherRow {
    date: String,
    #[serde(alias = "relative_humidity")]
    humidity: f64,
    #[serde(alias = "precipitationProbability", alias = "precip_prob")]
    precipitation_probability: f64,
    #[serde(default, alias = "temperatureMin", alias = "temp_min")]
    temperature_min: Option<f64>,
    #[serde(default, alias = "temperatureMax", alias = "temp_max")]
    temperature_max: Option<f64>,
}

impl WeatherRow {
    fn into_day(self) -> Option<WeatherDay> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        Some(
            WeatherDay::new(date, self.humidity, self.precipitation_probability).with_temperatures(
                self.temperature_min.unwrap_or(0.0),
                self.temperature_max.unwrap_or(0.0),
            ),
        )
    }
}

/// Parse CSV forecast data from any reader.
pub fn parse_weather_csv(reader: impl Read) -> Result<WeatherMap> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut map = WeatherMap::new();
    for (line, result) in rdr.deserialize::<WeatherRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(row = line + 1, error = %e, "skipping unreadable weather row");
                continue;
            }
        };
        match row.into_day() {
            Some(day) => map.insert(day),
            None => warn!(row = line + 1, "skipping weather row with bad date"),
        }
    }
    Ok(map)
}

/// Parse a JSON array of weather days (camelCase fields, as the web host sends).
///
/// The array itself must parse; records inside it that do not are skipped.
pub fn parse_weather_json(text: &str) -> Result<WeatherMap> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(text).context("parse weather JSON")?;

    let mut map = WeatherMap::new();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<WeatherDay>(record) {
            Ok(day) => map.insert(day),
            Err(e) => warn!(index, error = %e, "skipping unreadable weather record"),
        }
    }
    debug!(days = map.len(), "parsed weather JSON");
    Ok(map)
}

/// Load a forecast file, choosing the format by extension (`.csv` or `.json`).
pub fn load_weather(path: impl AsRef<Path>) -> Result<WeatherMap> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let map = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            parse_weather_csv(file).with_context(|| format!("parsing {}", path.display()))?
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            parse_weather_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        other => bail!(
            "unsupported weather file extension '{other}' for {} (expected .csv or .json)",
            path.display()
        ),
    };

    debug!(path = %path.display(), days = map.len(), "loaded weather");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use washday_core::WeatherLookup;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_weather_csv_basic() {
        let csv = "\
date,humidity,precipitation_probability,temperature_min,temperature_max
2026-10-19, 72, 10, 8.5, 16.0
2026-10-20,88,65,9,14
";
        let map = parse_weather_csv(csv.as_bytes()).unwrap();
        assert_eq!(map.len(), 2);
        let wet = map.get(d("2026-10-20")).unwrap();
        assert_eq!(wet.humidity, 88.0);
        assert_eq!(wet.precipitation_probability, 65.0);
        assert_eq!(wet.temperature_max, 14.0);
    }

    #[test]
    fn test_parse_weather_csv_skips_bad_rows() {
        let csv = "\
precipitation_probability,date,humidity
10,2026-10-19,50
x,2026-10-20,50
20,10/21/2026,50
30,2026-10-22,55
";
        let map = parse_weather_csv(csv.as_bytes()).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.get(d("2026-10-20")).is_none());
        assert_eq!(map.get(d("2026-10-22")).unwrap().temperature_min, 0.0);
    }

    #[test]
    fn test_parse_weather_json() {
        let json = r#"[
            {"date":"2026-10-19","humidity":61,"precipitationProbability":5,"temperatureMin":7,"temperatureMax":15},
            {"date":"2026-10-19","humidity":90,"precipitationProbability":80,"temperatureMin":7,"temperatureMax":12}
        ]"#;
        let map = parse_weather_json(json).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(d("2026-10-19")).unwrap().humidity, 90.0);
        assert!(parse_weather_json("{not json").is_err());
    }

    #[test]
    fn test_bad_json_records_are_skipped() {
        let json = r#"[
            {"date":"2026-10-19","humidity":61,"precipitationProbability":5,"temperatureMin":7,"temperatureMax":15},
            {"date":"2026-10-20","humidity":70,"precipitationProbability":10,"temperatureMax":12},
            {"date":"2026-10-21","humidity":"muggy","precipitationProbability":10,"temperatureMin":7,"temperatureMax":12},
            {"date":"2026-10-22","humidity":55,"precipitationProbability":30,"temperatureMin":6,"temperatureMax":11}
        ]"#;
        let map = parse_weather_json(json).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.get(d("2026-10-20")).is_none());
        assert!(map.get(d("2026-10-21")).is_none());
        assert_eq!(map.get(d("2026-10-22")).unwrap().precipitation_probability, 30.0);
    }
}
