//! washday-ingest: load host files into the engine's inbound contracts.

pub mod inputs;
pub mod weather;

pub use inputs::{load_events, load_wash_log, save_wash_log};
pub use weather::{load_weather, parse_weather_csv, parse_weather_json};
