use chrono::{Duration, NaiveDateTime};

use crate::domain::duty_log::duty_entry::{DutyEntry, DutyStatus};
use crate::domain::hos::clock;
use crate::domain::hos::leg::Leg;
use crate::domain::hos::midnight_splitter;
use crate::domain::hos::rules::RuleConstants;
use crate::domain::location::Location;
use crate::error::Result;

/// Float residue below this many miles is treated as zero.
pub const MILE_EPSILON: f64 = 1e-6;

/// Carry-state threaded through every leg of one trip.
///
/// Each accumulator is reset only by the event that consumes it: the sleeper
/// break resets `hours_since_last_sleep` and `miles_since_last_rest`, a fuel
/// stop resets `miles_since_last_fuel`, a rest break resets
/// `miles_since_last_rest`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub current_instant: NaiveDateTime,
    pub miles_since_last_rest: f64,
    pub miles_since_last_fuel: f64,
    pub hours_since_last_sleep: f64,
    pub day_counter: u32,
}

impl SimulationState {
    pub fn new(start: NaiveDateTime) -> SimulationState {
        SimulationState { current_instant: start, miles_since_last_rest: 0.0, miles_since_last_fuel: 0.0, hours_since_last_sleep: 0.0, day_counter: 1 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegSimulation {
    pub entries: Vec<DutyEntry>,
    pub state: SimulationState,
}

/// The threshold that ends a driving stretch. Declaration order is the
/// tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Rest,
    Fuel,
    Sleep,
    LegEnd,
}

/// Appends one interval at the state's current instant, split at midnight as
/// needed, and advances the clock and the day counter.
///
/// Zero-length intervals, which only come out of sub-second rounding, are
/// dropped.
pub fn record_interval(
    mut state: SimulationState,
    entries: &mut Vec<DutyEntry>,
    duration: Duration,
    status: DutyStatus,
    remarks: &str,
    stop_location: Option<Location>,
) -> SimulationState {
    if duration <= Duration::zero() {
        return state;
    }

    let outcome = midnight_splitter::split(state.current_instant, duration, status, remarks, stop_location, state.day_counter);
    entries.extend(outcome.entries);
    state.current_instant = outcome.end_instant;
    state.day_counter = outcome.day_counter;
    state
}

/// Generates the duty entries for driving one leg.
///
/// Each iteration either takes the mandatory sleeper break, or drives up to
/// the nearest of the rest, fuel and sleep thresholds or the end of the leg
/// and then takes the rest or fuel stop that threshold calls for. A threshold
/// that lost a tie is due at the top of the next iteration and fires before
/// any further driving.
pub fn simulate_leg(state: SimulationState, leg: &Leg, rules: &RuleConstants) -> Result<LegSimulation> {
    leg.validate()?;

    let mut state = state;
    let mut entries = Vec::new();
    let mut miles_driven = 0.0;

    let (drive_status, activity) = if leg.off_duty_transit { (DutyStatus::OffDuty, "Traveling") } else { (DutyStatus::Driving, "Driving") };

    while leg.distance_miles - miles_driven > MILE_EPSILON {
        if rules.miles_until_sleep(state.hours_since_last_sleep) <= MILE_EPSILON {
            let location = leg.location_at(progress(leg, miles_driven));
            log::debug!("Sleeper break {} after {:.2} driving hours at mile {:.1}", leg.description, state.hours_since_last_sleep, miles_driven);

            state = record_interval(state, &mut entries, rules.sleeper_duration(), DutyStatus::SleeperBerth, &format!("Mandatory sleep {}", leg.description), Some(location));
            state.hours_since_last_sleep = 0.0;
            state.miles_since_last_rest = 0.0;
            continue;
        }
        if rules.rest_interval_miles - state.miles_since_last_rest <= MILE_EPSILON {
            state = take_stop(state, &mut entries, Boundary::Rest, leg, miles_driven, rules);
            continue;
        }
        if rules.fuel_interval_miles - state.miles_since_last_fuel <= MILE_EPSILON {
            state = take_stop(state, &mut entries, Boundary::Fuel, leg, miles_driven, rules);
            continue;
        }

        let (boundary, miles) = next_boundary(&state, leg.distance_miles - miles_driven, rules);
        let hours = rules.drive_hours_for(miles);

        state = record_interval(state, &mut entries, clock::hours_to_duration(hours), drive_status, &format!("{} {}", activity, leg.description), None);
        miles_driven += miles;
        state.miles_since_last_rest += miles;
        state.miles_since_last_fuel += miles;
        state.hours_since_last_sleep += hours;

        if matches!(boundary, Boundary::Rest | Boundary::Fuel) {
            state = take_stop(state, &mut entries, boundary, leg, miles_driven, rules);
        }
    }

    log::debug!("Simulated leg {} ({:.1} mi) into {} entries, clock at {}", leg.description, leg.distance_miles, entries.len(), state.current_instant);

    Ok(LegSimulation { entries, state })
}

fn progress(leg: &Leg, miles_driven: f64) -> f64 {
    if leg.distance_miles > 0.0 { miles_driven / leg.distance_miles } else { 1.0 }
}

/// Records the 30-minute on-duty rest break or fuel stop at the current
/// progress point and resets the accumulator it consumes.
fn take_stop(state: SimulationState, entries: &mut Vec<DutyEntry>, boundary: Boundary, leg: &Leg, miles_driven: f64, rules: &RuleConstants) -> SimulationState {
    let location = leg.location_at(progress(leg, miles_driven));

    match boundary {
        Boundary::Rest => {
            log::debug!("Rest break {} at mile {:.1}", leg.description, miles_driven);
            let mut state = record_interval(state, entries, rules.rest_break(), DutyStatus::OnDuty, &format!("Mandatory rest {}", leg.description), Some(location));
            state.miles_since_last_rest = 0.0;
            state
        }
        Boundary::Fuel => {
            log::debug!("Fuel stop {} at mile {:.1}", leg.description, miles_driven);
            let mut state = record_interval(state, entries, rules.fuel_stop(), DutyStatus::OnDuty, &format!("Fuel stop {}", leg.description), Some(location));
            state.miles_since_last_fuel = 0.0;
            state
        }
        Boundary::Sleep | Boundary::LegEnd => state,
    }
}

/// Smallest strictly positive distance among the thresholds and the rest of
/// the leg. Ties go to the earliest `Boundary` variant.
fn next_boundary(state: &SimulationState, leg_remaining: f64, rules: &RuleConstants) -> (Boundary, f64) {
    let candidates = [
        (Boundary::Rest, rules.rest_interval_miles - state.miles_since_last_rest),
        (Boundary::Fuel, rules.fuel_interval_miles - state.miles_since_last_fuel),
        (Boundary::Sleep, rules.miles_until_sleep(state.hours_since_last_sleep)),
        (Boundary::LegEnd, leg_remaining),
    ];

    let nearest = candidates.iter().map(|(_, miles)| *miles).filter(|miles| *miles > MILE_EPSILON).fold(f64::INFINITY, f64::min);

    candidates
        .into_iter()
        .find(|(_, miles)| *miles > MILE_EPSILON && *miles <= nearest + MILE_EPSILON)
        .map(|(boundary, _)| (boundary, nearest))
        .unwrap_or((Boundary::LegEnd, leg_remaining))
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod tests;
