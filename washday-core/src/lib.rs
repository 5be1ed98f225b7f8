//! washday-core: wash-day scheduling engine.
//!
//! Pure, synchronous computation over host-supplied snapshots: settings,
//! target events, manual washes and a weather lookup go in; a deduplicated
//! wash list and a per-day quality timeline come out.

pub mod cycle;
pub mod date;
pub mod error;
pub mod event;
pub mod hairstyle;
pub mod overview;
pub mod quality;
pub mod schedule;
pub mod settings;
pub mod shift;
pub mod suggest;
pub mod timeline;
pub mod wash;
pub mod weather;

pub use cycle::{back_calculate, back_calculate_dates, effective_cycle_length};
pub use date::{add_days, diff_days, format_date, parse_date};
pub use error::{Error, Result};
pub use event::TargetEvent;
pub use hairstyle::{Hairstyle, WeatherSensitivity};
pub use quality::{Phase, StyleContext, phase, quality_score, weather_adjusted_style_duration};
pub use schedule::{SCHEDULE_HORIZON_DAYS, ScheduleResult, compute_schedule};
pub use settings::{FlexibilityMode, Settings};
pub use shift::{ShiftedDate, find_safe_date};
pub use suggest::suggest_wash_days;
pub use timeline::{DayInfo, build_day_info_map};
pub use wash::{CoverageIndex, WashDay, WashKind, WashLog};
pub use weather::{NoWeather, WeatherDay, WeatherLookup, WeatherMap};
