use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::duty_log::duty_entry::{DutyEntry, DutyStatus};

/// Per-day totals of a duty log, as printed on the recap of a log sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyLogSummary {
    pub day: u32,
    pub date: NaiveDate,
    pub off_duty_hours: f64,
    pub sleeper_hours: f64,
    pub driving_hours: f64,
    pub on_duty_hours: f64,
    pub entry_count: usize,
}

impl DailyLogSummary {
    fn empty(day: u32, date: NaiveDate) -> DailyLogSummary {
        DailyLogSummary { day, date, off_duty_hours: 0.0, sleeper_hours: 0.0, driving_hours: 0.0, on_duty_hours: 0.0, entry_count: 0 }
    }

    pub fn hours_for(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::OffDuty => self.off_duty_hours,
            DutyStatus::SleeperBerth => self.sleeper_hours,
            DutyStatus::Driving => self.driving_hours,
            DutyStatus::OnDuty => self.on_duty_hours,
        }
    }

    pub fn total_hours(&self) -> f64 {
        DutyStatus::ALL.iter().map(|s| self.hours_for(*s)).sum()
    }

    /// Groups entries by their day index, in day order.
    pub fn from_entries(entries: &[DutyEntry]) -> Vec<DailyLogSummary> {
        let mut days: BTreeMap<u32, DailyLogSummary> = BTreeMap::new();

        for entry in entries {
            days.entry(entry.day_index).or_insert_with(|| DailyLogSummary::empty(entry.day_index, entry.date)).add(entry);
        }

        days.into_values().collect()
    }

    fn add(&mut self, entry: &DutyEntry) {
        let hours = entry.hours();
        match entry.status {
            DutyStatus::OffDuty => self.off_duty_hours += hours,
            DutyStatus::SleeperBerth => self.sleeper_hours += hours,
            DutyStatus::Driving => self.driving_hours += hours,
            DutyStatus::OnDuty => self.on_duty_hours += hours,
        }
        self.entry_count += 1;
    }
}
