//! The single place where day-boundary logic lives.

use chrono::{Duration, NaiveDateTime};

use crate::domain::duty_log::duty_entry::{DutyEntry, DutyStatus};
use crate::domain::hos::clock;
use crate::domain::location::Location;

pub const BEFORE_MIDNIGHT: &str = "(before midnight)";
pub const AFTER_MIDNIGHT: &str = "(after midnight)";

#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    pub entries: Vec<DutyEntry>,
    pub end_instant: NaiveDateTime,
    pub day_counter: u32,
}

/// Lays the interval `[start, start + duration)` onto calendar days.
///
/// An interval inside one day yields one entry. One that crosses midnight
/// yields the remainder of the first day ("(before midnight)") and the
/// continuation from 00:00:00 ("(after midnight)"), and the day counter moves
/// on by one per crossing. An interval that ends exactly at midnight stays a
/// single entry ending 23:59:59, the counter still advances since the clock is
/// now on the next day.
///
/// An interval ending at 23:59:59 is stretched by one second onto midnight,
/// since a stored end of 23:59:59 always reads back as midnight.
///
/// Rule constants keep every interval below 24 hours, so at most two entries
/// come back.
pub fn split(start: NaiveDateTime, duration: Duration, status: DutyStatus, remarks: &str, stop_location: Option<Location>, day_counter: u32) -> SplitOutcome {
    let end = snap_to_midnight(start + duration);
    let mut entries = Vec::with_capacity(2);
    let mut cursor = start;
    let mut day = day_counter;

    loop {
        let midnight = clock::next_midnight(cursor);
        let continued = cursor != start;

        if end < midnight {
            let text = if continued { format!("{} {}", remarks, AFTER_MIDNIGHT) } else { remarks.to_string() };
            entries.push(entry(cursor, end.time(), status, text, stop_location, day));
            break;
        }

        let text = match (continued, end == midnight) {
            (true, _) => format!("{} {}", remarks, AFTER_MIDNIGHT),
            (false, true) => remarks.to_string(),
            (false, false) => format!("{} {}", remarks, BEFORE_MIDNIGHT),
        };
        entries.push(entry(cursor, clock::end_of_day(), status, text, stop_location, day));

        day += 1;
        cursor = midnight;
        if end == midnight {
            break;
        }
    }

    SplitOutcome { entries, end_instant: end, day_counter: day }
}

fn snap_to_midnight(end: NaiveDateTime) -> NaiveDateTime {
    if end.time() == clock::end_of_day() { end + Duration::seconds(1) } else { end }
}

fn entry(start: NaiveDateTime, end_time: chrono::NaiveTime, status: DutyStatus, remarks: String, stop_location: Option<Location>, day_index: u32) -> DutyEntry {
    DutyEntry { date: start.date(), start_time: start.time(), end_time, status, remarks, stop_location, day_index }
}
