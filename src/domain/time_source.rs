use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Source of the current wall-clock instant.
///
/// Trips start on their requested date at the current time of day, and an
/// absent reference date means "today". Both come from here so a run can be
/// pinned to a fixed instant.
pub trait TimeSource: std::fmt::Debug + Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn time_of_day(&self) -> NaiveTime {
        self.now().time()
    }
}

/// Local wall clock of the machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> NaiveDateTime {
        // Whole seconds keep generated log times on the same grid as the entries.
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    pub instant: NaiveDateTime,
}

impl FixedTimeSource {
    pub fn new(instant: NaiveDateTime) -> FixedTimeSource {
        FixedTimeSource { instant }
    }

    pub fn at(date: NaiveDate, time: NaiveTime) -> FixedTimeSource {
        FixedTimeSource { instant: date.and_time(time) }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}
