use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::hos::clock;
use crate::domain::location::Location;

/// Mutually exclusive classification of a logged time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DutyStatus {
    OffDuty,
    #[serde(rename = "sleeper")]
    SleeperBerth,
    Driving,
    OnDuty,
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [DutyStatus::OffDuty, DutyStatus::SleeperBerth, DutyStatus::Driving, DutyStatus::OnDuty];

    /// Driving and on-duty time count against the rolling-window cap.
    pub fn counts_toward_cycle(&self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDuty)
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::SleeperBerth => "Sleeper",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDuty => "On Duty",
        };
        f.write_str(label)
    }
}

/// One duty status over a contiguous span inside a single calendar day.
///
/// A span that runs up to midnight records `end_time` as 23:59:59, the last
/// representable second of the day; [`DutyEntry::end_instant`] maps it back to
/// the following midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyEntry {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: DutyStatus,
    pub remarks: String,
    pub stop_location: Option<Location>,
    /// 1-based ordinal of the trip day.
    #[serde(rename = "day")]
    pub day_index: u32,
}

impl DutyEntry {
    pub fn start_instant(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn end_instant(&self) -> NaiveDateTime {
        if self.runs_to_midnight() {
            clock::next_midnight(self.start_instant())
        } else {
            self.date.and_time(self.end_time)
        }
    }

    pub fn runs_to_midnight(&self) -> bool {
        self.end_time == clock::end_of_day()
    }

    pub fn duration(&self) -> Duration {
        self.end_instant() - self.start_instant()
    }

    pub fn hours(&self) -> f64 {
        clock::duration_to_hours(self.duration())
    }
}
