use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::duty_log::duty_entry::{DutyEntry, DutyStatus};
use crate::domain::hos::availability::AvailabilityWindow;
use crate::domain::hos::leg::Leg;
use crate::domain::hos::rules::RuleConstants;
use crate::domain::hos::simulator::{SimulationState, record_interval, simulate_leg};
use crate::domain::location::Location;
use crate::error::{Error, Result};

/// The two driving legs of a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripLegs {
    pub to_pickup: Leg,
    pub to_dropoff: Leg,
}

impl TripLegs {
    pub fn total_distance_miles(&self) -> f64 {
        self.to_pickup.distance_miles + self.to_dropoff.distance_miles
    }

    pub fn total_duration_hours(&self) -> f64 {
        self.to_pickup.duration_hours + self.to_dropoff.duration_hours
    }
}

/// A fully generated duty log for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSchedule {
    pub entries: Vec<DutyEntry>,
    pub end_date: NaiveDate,
    pub end_instant: NaiveDateTime,
    pub distance_miles: f64,
    pub estimated_duration_hours: f64,
    pub availability: AvailabilityWindow,
}

#[derive(Debug, Clone)]
pub struct TripScheduler<'a> {
    rules: &'a RuleConstants,
}

impl<'a> TripScheduler<'a> {
    pub fn new(rules: &'a RuleConstants) -> TripScheduler<'a> {
        TripScheduler { rules }
    }

    /// Gates the trip on the driver's rolling-window hours, then generates the
    /// whole log in memory: transit to pickup, loading, the loaded leg,
    /// unloading and the closing off-duty entry.
    pub fn schedule_trip(&self, history: &[DutyEntry], legs: &TripLegs, pickup: Location, dropoff: Location, start: NaiveDateTime) -> Result<TripSchedule> {
        let availability = AvailabilityWindow::compute(history, start.date(), self.rules);
        let required = legs.total_duration_hours();

        if availability.hours_available <= 0.0 {
            log::warn!("Rejecting trip: {:.2} h used since {}, no hours left", availability.hours_used, availability.window_start);
            return Err(Error::InsufficientHours { limit: self.rules.cycle_limit_hours, window_days: self.rules.cycle_window_days });
        }
        if required > availability.hours_available {
            log::warn!("Rejecting trip: needs {:.2} h, only {:.2} h available", required, availability.hours_available);
            return Err(Error::DurationExceedsAvailability { required, available: availability.hours_available });
        }

        let mut entries = Vec::new();
        let state = SimulationState::new(start);

        let state = self.travel(state, &legs.to_pickup, &mut entries)?;
        let state = record_interval(state, &mut entries, self.rules.loading(), DutyStatus::OnDuty, "Pickup location - Loading cargo", Some(pickup));

        let state = self.travel(state, &legs.to_dropoff, &mut entries)?;
        let state = record_interval(state, &mut entries, self.rules.unloading(), DutyStatus::OnDuty, "Drop-off location - Unloading cargo", Some(dropoff));
        let state = record_interval(state, &mut entries, self.rules.finish(), DutyStatus::OffDuty, "Finished", None);

        let end_instant = state.current_instant;
        log::info!("Generated {} duty entries over {} day(s), finishing {}", entries.len(), state.day_counter, end_instant);

        Ok(TripSchedule {
            entries,
            end_date: end_instant.date(),
            end_instant,
            distance_miles: legs.total_distance_miles(),
            estimated_duration_hours: required,
            availability,
        })
    }

    /// A stationary leg (already at its destination) adds nothing to the log.
    fn travel(&self, state: SimulationState, leg: &Leg, entries: &mut Vec<DutyEntry>) -> Result<SimulationState> {
        if leg.is_stationary() {
            log::debug!("No travel needed {}", leg.description);
            return Ok(state);
        }

        let simulated = simulate_leg(state, leg, self.rules)?;
        entries.extend(simulated.entries);
        Ok(simulated.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap().and_hms_opt(8, 0, 0).unwrap()
    }

    fn leg(distance_miles: f64, description: &str, off_duty_transit: bool) -> Leg {
        Leg {
            origin: Location { lat: 41.0, lng: -87.0 },
            destination: Location { lat: 39.0, lng: -84.0 },
            distance_miles,
            duration_hours: distance_miles / 55.0,
            waypoints: vec![],
            off_duty_transit,
            description: description.to_string(),
        }
    }

    fn legs(to_pickup: f64, to_dropoff: f64) -> TripLegs {
        TripLegs { to_pickup: leg(to_pickup, "to pickup location", true), to_dropoff: leg(to_dropoff, "to dropoff location", false) }
    }

    const PICKUP: Location = Location { lat: 41.0, lng: -87.0 };
    const DROPOFF: Location = Location { lat: 39.0, lng: -84.0 };

    #[test]
    fn test_short_trip_sequence() {
        let rules = RuleConstants::default();
        let schedule = TripScheduler::new(&rules).schedule_trip(&[], &legs(30.0, 120.0), PICKUP, DROPOFF, start()).unwrap();

        let remarks: Vec<&str> = schedule.entries.iter().map(|e| e.remarks.as_str()).collect();
        assert_eq!(
            remarks,
            vec!["Traveling to pickup location", "Pickup location - Loading cargo", "Driving to dropoff location", "Drop-off location - Unloading cargo", "Finished"]
        );

        assert_eq!(schedule.entries[1].stop_location, Some(PICKUP));
        assert_eq!(schedule.entries[3].stop_location, Some(DROPOFF));
        assert_eq!(schedule.entries[4].status, DutyStatus::OffDuty);
        assert_eq!(schedule.entries[4].duration(), Duration::minutes(15));

        // 30 min transit + 1 h loading + 2 h driving + 1 h unloading + 15 min.
        assert_eq!(schedule.end_instant, start() + Duration::minutes(285));
        assert_eq!(schedule.end_date, start().date());
        assert!((schedule.distance_miles - 150.0).abs() < 1e-9);
        assert_eq!(schedule.availability.hours_available, 70.0);
    }

    #[test]
    fn test_end_date_follows_midnight_crossings() {
        let rules = RuleConstants::default();
        let schedule = TripScheduler::new(&rules).schedule_trip(&[], &legs(100.0, 1300.0), PICKUP, DROPOFF, start()).unwrap();

        let last = schedule.entries.last().unwrap();
        assert_eq!(schedule.end_date, last.end_instant().date());
        assert!(schedule.end_date > start().date());
        assert_eq!(last.day_index as i64, (schedule.end_date - start().date()).num_days() + 1);
    }

    #[test]
    fn test_leg_ending_one_second_before_midnight_stays_contiguous() {
        let rules = RuleConstants::default();
        let late = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap().and_hms_opt(23, 0, 0).unwrap();
        let mut trip = legs(59.99, 120.0);
        trip.to_pickup.duration_hours = 1.0;

        let schedule = TripScheduler::new(&rules).schedule_trip(&[], &trip, PICKUP, DROPOFF, late).unwrap();

        let transit = &schedule.entries[0];
        assert_eq!(transit.end_time, NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(schedule.entries[1].date, NaiveDate::from_ymd_opt(2024, 9, 3).unwrap());
        assert_eq!(schedule.entries[1].start_time, NaiveTime::MIN);
        assert_eq!(schedule.entries[1].day_index, 2);

        for pair in schedule.entries.windows(2) {
            assert_eq!(pair[0].end_instant(), pair[1].start_instant());
        }
        let logged: Duration = schedule.entries.iter().map(DutyEntry::duration).fold(Duration::zero(), |sum, d| sum + d);
        assert_eq!(logged, schedule.end_instant - late);
    }

    #[test]
    fn test_stationary_leg_to_pickup_starts_with_loading() {
        let rules = RuleConstants::default();
        let mut trip = legs(0.0, 120.0);
        trip.to_pickup.duration_hours = 0.0;

        let schedule = TripScheduler::new(&rules).schedule_trip(&[], &trip, PICKUP, DROPOFF, start()).unwrap();

        assert_eq!(schedule.entries[0].remarks, "Pickup location - Loading cargo");
        assert_eq!(schedule.entries[0].start_instant(), start());
        assert_eq!(schedule.end_instant, start() + Duration::minutes(255));
    }

    #[test]
    fn test_gate_rejects_exhausted_driver() {
        let rules = RuleConstants::default();
        let history: Vec<DutyEntry> = (0..7)
            .map(|offset| DutyEntry {
                date: start().date() - Duration::days(offset),
                start_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                status: DutyStatus::Driving,
                remarks: String::new(),
                stop_location: None,
                day_index: 1,
            })
            .collect();

        let result = TripScheduler::new(&rules).schedule_trip(&history, &legs(10.0, 10.0), PICKUP, DROPOFF, start());
        assert!(matches!(result, Err(Error::InsufficientHours { .. })));
    }

    #[test]
    fn test_gate_rejects_trip_longer_than_available_hours() {
        let rules = RuleConstants { cycle_limit_hours: 10.0, ..RuleConstants::default() };
        let result = TripScheduler::new(&rules).schedule_trip(&[], &legs(300.0, 400.0), PICKUP, DROPOFF, start());

        match result {
            Err(Error::DurationExceedsAvailability { required, available }) => {
                assert!((required - 700.0 / 55.0).abs() < 1e-9);
                assert_eq!(available, 10.0);
            }
            other => panic!("Expected DurationExceedsAvailability, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_leg_aborts_the_whole_trip() {
        let rules = RuleConstants::default();
        let mut bad = legs(10.0, 10.0);
        bad.to_dropoff.distance_miles = -1.0;

        let result = TripScheduler::new(&rules).schedule_trip(&[], &bad, PICKUP, DROPOFF, start());
        assert!(matches!(result, Err(Error::InvalidLeg(_))));
    }
}
