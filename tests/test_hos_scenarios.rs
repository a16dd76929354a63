mod common;

use chrono::{Duration, NaiveDateTime, NaiveTime};

use hos_trip_log::domain::duty_log::daily_summary::DailyLogSummary;
use hos_trip_log::domain::duty_log::duty_entry::{DutyEntry, DutyStatus};
use hos_trip_log::domain::fleet::repository::FleetRepository;
use hos_trip_log::domain::fleet::trip::Trip;
use hos_trip_log::domain::hos::availability::available_hours;
use hos_trip_log::domain::hos::leg::Leg;
use hos_trip_log::domain::hos::midnight_splitter::split;
use hos_trip_log::domain::hos::rules::RuleConstants;
use hos_trip_log::domain::hos::scheduler::{TripLegs, TripScheduler};
use hos_trip_log::domain::hos::simulator::{SimulationState, simulate_leg};
use hos_trip_log::domain::location::Location;
use hos_trip_log::domain::trip_service::TripService;
use hos_trip_log::domain::utils::id::{DriverId, TripId, VehicleId};
use hos_trip_log::error::Error;

use common::*;

const ORIGIN: Location = Location { lat: 41.8781, lng: -87.6298 };
const DESTINATION: Location = Location { lat: 39.9612, lng: -82.9988 };

fn leg(distance_miles: f64, description: &str, off_duty_transit: bool) -> Leg {
    Leg {
        origin: ORIGIN,
        destination: DESTINATION,
        distance_miles,
        duration_hours: distance_miles / 60.0,
        waypoints: Vec::new(),
        off_duty_transit,
        description: description.to_string(),
    }
}

fn driving(day: NaiveDateTime, hours: i64) -> DutyEntry {
    let end = day + Duration::hours(hours);
    DutyEntry {
        date: day.date(),
        start_time: day.time(),
        end_time: end.time(),
        status: DutyStatus::Driving,
        remarks: "Driving to dropoff location".to_string(),
        stop_location: None,
        day_index: 1,
    }
}

#[test]
fn test_scenario_a_fresh_driver_has_full_cycle() {
    let rules = RuleConstants::default();
    assert_eq!(available_hours(&[], date(2024, 9, 2), &rules), 70.0);
}

#[test]
fn test_scenario_b_short_leg_is_one_driving_entry() {
    let rules = RuleConstants::default();
    let start = at(date(2024, 9, 2), 8, 0);

    let result = simulate_leg(SimulationState::new(start), &leg(50.0, "to dropoff location", false), &rules).unwrap();

    assert_eq!(result.entries.len(), 1);
    let entry = &result.entries[0];
    assert_eq!(entry.status, DutyStatus::Driving);
    assert_eq!(entry.duration(), Duration::minutes(50));
    assert_eq!(entry.remarks, "Driving to dropoff location");
    assert_eq!(entry.day_index, 1);
    assert!((result.state.miles_since_last_rest - 50.0).abs() < 1e-9);
    assert_eq!(result.state.current_instant, start + Duration::minutes(50));
}

#[test]
fn test_scenario_c_sleeper_break_at_eleven_hours() {
    let rules = RuleConstants { rest_interval_miles: 100_000.0, fuel_interval_miles: 100_000.0, ..RuleConstants::default() };
    let start = at(date(2024, 9, 2), 0, 30);

    let result = simulate_leg(SimulationState::new(start), &leg(800.0, "to dropoff location", false), &rules).unwrap();

    let statuses: Vec<DutyStatus> = result.entries.iter().map(|e| e.status).collect();
    assert_eq!(statuses, vec![DutyStatus::Driving, DutyStatus::SleeperBerth, DutyStatus::Driving]);

    assert_eq!(result.entries[0].duration(), Duration::hours(11));
    assert_eq!(result.entries[1].start_time, NaiveTime::from_hms_opt(11, 30, 0).unwrap());
    assert_eq!(result.entries[1].duration(), Duration::hours(10));
    assert!(result.entries[1].stop_location.is_some());
    assert_eq!(result.entries[2].duration(), Duration::minutes(140));

    assert!((result.state.hours_since_last_sleep - 140.0 / 60.0).abs() < 1e-9);
    assert!((result.state.miles_since_last_rest - 140.0).abs() < 1e-9);
}

#[test]
fn test_scenario_d_entry_crossing_midnight_is_split() {
    let start = at(date(2024, 9, 2), 23, 30);
    let outcome = split(start, Duration::minutes(90), DutyStatus::Driving, "Driving to dropoff location", None, 1);

    assert_eq!(outcome.entries.len(), 2);
    let (before, after) = (&outcome.entries[0], &outcome.entries[1]);

    assert_eq!(before.date, date(2024, 9, 2));
    assert_eq!(before.end_time, NaiveTime::from_hms_opt(23, 59, 59).unwrap());
    assert_eq!(before.remarks, "Driving to dropoff location (before midnight)");
    assert_eq!(before.day_index, 1);

    assert_eq!(after.date, date(2024, 9, 3));
    assert_eq!(after.start_time, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    assert_eq!(after.end_time, NaiveTime::from_hms_opt(1, 0, 0).unwrap());
    assert_eq!(after.remarks, "Driving to dropoff location (after midnight)");
    assert_eq!(after.day_index, 2);

    assert_eq!(outcome.day_counter, 2);
    assert_eq!(before.duration() + after.duration(), Duration::minutes(90));
}

#[test]
fn test_scenario_e_trip_longer_than_available_hours_persists_nothing() {
    let reference = date(2024, 9, 9);
    let mut repository = seeded_repository();

    // 6 x 11 h of driving inside the window leaves 4 hours.
    let history: Vec<DutyEntry> = (1..=6).map(|offset| driving(at(reference - Duration::days(offset), 6, 0), 11)).collect();
    let earlier = Trip {
        id: TripId::new("earlier"),
        driver_id: DriverId::new("1"),
        vehicle_id: VehicleId::new("1"),
        date: reference - Duration::days(6),
        end_date: reference - Duration::days(1),
        current_location: ORIGIN,
        pickup_location: ORIGIN,
        dropoff_location: DESTINATION,
        distance_miles: 3960.0,
        estimated_duration_hours: 66.0,
        created_at: at(reference - Duration::days(7), 12, 0),
        logs: history,
    };
    repository.save_trip(earlier).unwrap();

    let router = ScriptedRouteProvider::legs(lookup(60.0, 1.0), lookup(240.0, 4.0));
    let mut service = TripService::new(repository, Box::new(router), clock_at(reference, 8, 0), RuleConstants::default());

    assert_eq!(service.driver_hours(&DriverId::new("1"), Some("2024-09-09")).unwrap().available_hours, 4.0);

    match service.create_trip(request(Some("2024-09-09"))) {
        Err(Error::DurationExceedsAvailability { required, available }) => {
            assert_eq!(required, 5.0);
            assert_eq!(available, 4.0);
        }
        other => panic!("Expected DurationExceedsAvailability, got {:?}", other),
    }

    let repository = service.into_repository();
    assert_eq!(repository.snapshot().trips.len(), 1);
    assert_eq!(repository.driver_log_history(&DriverId::new("1")).unwrap().len(), 6);
}

#[test]
fn test_generated_log_properties_over_multi_day_trip() {
    let rules = RuleConstants::default();
    let start = at(date(2024, 9, 2), 20, 0);
    let legs = TripLegs { to_pickup: leg(200.0, "to pickup location", true), to_dropoff: leg(1500.0, "to dropoff location", false) };

    let schedule = TripScheduler::new(&rules).schedule_trip(&[], &legs, ORIGIN, DESTINATION, start).unwrap();
    let entries = &schedule.entries;

    assert_eq!(entries.first().unwrap().start_instant(), start);
    assert_eq!(entries.last().unwrap().remarks, "Finished");
    assert_eq!(entries.last().unwrap().end_instant(), schedule.end_instant);

    for pair in entries.windows(2) {
        assert_eq!(pair[0].end_instant(), pair[1].start_instant(), "gap or overlap after {:?}", pair[0]);
        assert!(pair[0].day_index <= pair[1].day_index);
    }

    for entry in entries {
        assert!(entry.end_time >= entry.start_time, "entry spans two days: {:?}", entry);
        assert_eq!(i64::from(entry.day_index) - 1, (entry.date - start.date()).num_days());
    }

    let transit_hours: f64 = entries.iter().filter(|e| e.remarks.starts_with("Traveling")).map(DutyEntry::hours).sum();
    let driving_hours: f64 = entries.iter().filter(|e| e.status == DutyStatus::Driving).map(DutyEntry::hours).sum();
    assert!((transit_hours * rules.avg_speed_mph - 200.0).abs() < 0.1);
    assert!((driving_hours * rules.avg_speed_mph - 1500.0).abs() < 0.1);

    let mut since_sleep = 0.0;
    for entry in entries {
        match entry.status {
            DutyStatus::SleeperBerth => since_sleep = 0.0,
            _ if entry.remarks.starts_with("Driving") || entry.remarks.starts_with("Traveling") => since_sleep += entry.hours(),
            _ => {}
        }
        assert!(since_sleep <= rules.max_drive_hours + 1e-3, "drove {:.3} h without sleeping", since_sleep);
    }

    let days = DailyLogSummary::from_entries(entries);
    assert_eq!(days.len() as i64, (schedule.end_date - start.date()).num_days() + 1);
    let summed: f64 = days.iter().map(DailyLogSummary::total_hours).sum();
    let logged: f64 = entries.iter().map(DutyEntry::hours).sum();
    assert!((summed - logged).abs() < 1e-9);
    assert!((logged - (schedule.end_instant - start).num_seconds() as f64 / 3600.0).abs() < 1e-9);
}

#[test]
fn test_available_hours_never_increase_with_more_work() {
    let rules = RuleConstants::default();
    let reference = date(2024, 9, 9);
    let mut history = Vec::new();
    let mut previous = available_hours(&history, reference, &rules);

    for offset in 0..9 {
        history.push(driving(at(reference - Duration::days(offset), 6, 0), 10));
        let current = available_hours(&history, reference, &rules);
        assert!(current <= previous);
        assert!(current >= 0.0);
        previous = current;
    }

    assert_eq!(previous, 0.0);
}
