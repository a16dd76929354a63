//! Date and time-of-day arithmetic shared by the duty-log generator.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::time_source::TimeSource;
use crate::error::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Last representable second of a day. Entries that run up to midnight end here.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::MIN + Duration::seconds(86_399)
}

pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Fractional hours rounded to whole seconds.
pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}

pub fn minutes(minutes: i64) -> Duration {
    Duration::minutes(minutes)
}

pub fn duration_to_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}

/// First instant of the day after `instant`.
pub fn next_midnight(instant: NaiveDateTime) -> NaiveDateTime {
    let next_day = instant.date().succ_opt().unwrap_or(NaiveDate::MAX);
    next_day.and_time(NaiveTime::MIN)
}

pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDateFormat(text.to_string()))
}

/// Parses an optional `YYYY-MM-DD` date, falling back to today.
pub fn resolve_date(text: Option<&str>, time_source: &dyn TimeSource) -> Result<NaiveDate> {
    match text {
        Some(text) if !text.trim().is_empty() => parse_date(text),
        _ => Ok(time_source.today()),
    }
}
