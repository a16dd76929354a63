use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::duty_log::duty_entry::DutyEntry;
use crate::domain::hos::rules::RuleConstants;

/// Hours consumed and left under the rolling cap as of `reference_date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub reference_date: NaiveDate,
    pub window_start: NaiveDate,
    pub hours_used: f64,
    pub hours_available: f64,
}

impl AvailabilityWindow {
    /// Sums Driving and OnDuty hours of the entries dated within
    /// `[reference_date - cycle_window_days, reference_date]`, both ends
    /// inclusive. Other statuses never count against the cap. A window
    /// reaching past the calendar range starts at the earliest date.
    pub fn compute(history: &[DutyEntry], reference_date: NaiveDate, rules: &RuleConstants) -> AvailabilityWindow {
        let window_days = Days::new(rules.cycle_window_days.max(0).unsigned_abs());
        let window_start = reference_date.checked_sub_days(window_days).unwrap_or(NaiveDate::MIN);

        let hours_used: f64 = history
            .iter()
            .filter(|entry| entry.date >= window_start && entry.date <= reference_date)
            .filter(|entry| entry.status.counts_toward_cycle())
            .map(DutyEntry::hours)
            .sum();

        AvailabilityWindow { reference_date, window_start, hours_used, hours_available: (rules.cycle_limit_hours - hours_used).max(0.0) }
    }
}

pub fn available_hours(history: &[DutyEntry], reference_date: NaiveDate, rules: &RuleConstants) -> f64 {
    AvailabilityWindow::compute(history, reference_date, rules).hours_available
}
