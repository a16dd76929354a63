use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::hos::clock;
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;

/// Thresholds governing the duty-log simulation and the rolling-window cap.
///
/// Every field has a default, so a rules file only needs to name the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleConstants {
    /// Driving hours allowed before a sleeper-berth break is mandatory.
    pub max_drive_hours: f64,

    /// Length of the mandatory sleeper-berth break.
    pub sleeper_duration_hours: f64,

    /// Miles driven before a 30-minute break is due. 480 miles is eight hours
    /// of driving at the default average speed.
    pub rest_interval_miles: f64,
    pub rest_break_minutes: i64,

    pub fuel_interval_miles: f64,
    pub fuel_stop_minutes: i64,

    /// Converts distance into driving time.
    pub avg_speed_mph: f64,

    pub loading_minutes: i64,
    pub unloading_minutes: i64,
    pub finish_minutes: i64,

    /// Cap on Driving + OnDuty hours inside the rolling window.
    pub cycle_limit_hours: f64,

    /// Days before the reference date that still count against the cap.
    pub cycle_window_days: i64,
}

impl Default for RuleConstants {
    fn default() -> Self {
        RuleConstants {
            max_drive_hours: 11.0,
            sleeper_duration_hours: 10.0,
            rest_interval_miles: 480.0,
            rest_break_minutes: 30,
            fuel_interval_miles: 1000.0,
            fuel_stop_minutes: 30,
            avg_speed_mph: 60.0,
            loading_minutes: 60,
            unloading_minutes: 60,
            finish_minutes: 15,
            cycle_limit_hours: 70.0,
            cycle_window_days: 8,
        }
    }
}

const MINUTES_PER_DAY: i64 = 24 * 60;
pub const MAX_CYCLE_WINDOW_DAYS: i64 = 365;

impl RuleConstants {
    /// Loads rule constants from a JSON file and validates them.
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<RuleConstants> {
        let rules: RuleConstants = parse_json_file(file_path)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Every generated interval must fit inside a day, so each one is bounded
    /// below 24 hours here.
    pub fn validate(&self) -> Result<()> {
        let hours = [
            ("maxDriveHours", self.max_drive_hours),
            ("sleeperDurationHours", self.sleeper_duration_hours),
            ("restIntervalMiles", self.rest_interval_miles),
            ("fuelIntervalMiles", self.fuel_interval_miles),
            ("avgSpeedMph", self.avg_speed_mph),
            ("cycleLimitHours", self.cycle_limit_hours),
        ];
        for (name, value) in hours {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidRuleConstants(format!("{} must be a positive number, got {}", name, value)));
            }
        }

        for (name, value) in [("maxDriveHours", self.max_drive_hours), ("sleeperDurationHours", self.sleeper_duration_hours)] {
            if value >= 24.0 {
                return Err(Error::InvalidRuleConstants(format!("{} must be shorter than a day, got {}", name, value)));
            }
        }

        let minutes = [
            ("restBreakMinutes", self.rest_break_minutes),
            ("fuelStopMinutes", self.fuel_stop_minutes),
            ("loadingMinutes", self.loading_minutes),
            ("unloadingMinutes", self.unloading_minutes),
            ("finishMinutes", self.finish_minutes),
        ];
        for (name, value) in minutes {
            if value <= 0 || value >= MINUTES_PER_DAY {
                return Err(Error::InvalidRuleConstants(format!("{} must be between 1 and {} minutes, got {}", name, MINUTES_PER_DAY - 1, value)));
            }
        }

        if !(0..=MAX_CYCLE_WINDOW_DAYS).contains(&self.cycle_window_days) {
            return Err(Error::InvalidRuleConstants(format!("cycleWindowDays must be between 0 and {}, got {}", MAX_CYCLE_WINDOW_DAYS, self.cycle_window_days)));
        }

        Ok(())
    }

    pub fn drive_hours_for(&self, miles: f64) -> f64 {
        miles / self.avg_speed_mph
    }

    /// Miles that can still be driven before the sleeper break is due.
    pub fn miles_until_sleep(&self, hours_since_last_sleep: f64) -> f64 {
        (self.max_drive_hours - hours_since_last_sleep) * self.avg_speed_mph
    }

    pub fn sleeper_duration(&self) -> Duration {
        clock::hours_to_duration(self.sleeper_duration_hours)
    }

    pub fn rest_break(&self) -> Duration {
        clock::minutes(self.rest_break_minutes)
    }

    pub fn fuel_stop(&self) -> Duration {
        clock::minutes(self.fuel_stop_minutes)
    }

    pub fn loading(&self) -> Duration {
        clock::minutes(self.loading_minutes)
    }

    pub fn unloading(&self) -> Duration {
        clock::minutes(self.unloading_minutes)
    }

    pub fn finish(&self) -> Duration {
        clock::minutes(self.finish_minutes)
    }
}
