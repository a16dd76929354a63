#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::{Arc, Mutex};

use hos_trip_log::api::fleet_dto::{NewDriverDto, NewVehicleDto};
use hos_trip_log::api::location_dto::LocationDto;
use hos_trip_log::api::trip_dto::{EntityRefDto, TripRequestDto};
use hos_trip_log::domain::fleet::repository::{FleetRepository, InMemoryFleetRepository};
use hos_trip_log::domain::hos::rules::RuleConstants;
use hos_trip_log::domain::location::Location;
use hos_trip_log::domain::routing::route_provider::{RouteLookup, RouteProvider};
use hos_trip_log::domain::time_source::{FixedTimeSource, TimeSource};
use hos_trip_log::domain::trip_service::TripService;
use hos_trip_log::error::{Error, Result};

pub const CURRENT: LocationDto = LocationDto { lat: 41.8781, lng: -87.6298 };
pub const PICKUP: LocationDto = LocationDto { lat: 39.7684, lng: -86.1581 };
pub const DROPOFF: LocationDto = LocationDto { lat: 39.9612, lng: -82.9988 };

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap()
}

pub fn clock_at(day: NaiveDate, hour: u32, minute: u32) -> Arc<dyn TimeSource> {
    Arc::new(FixedTimeSource::at(day, NaiveTime::from_hms_opt(hour, minute, 0).unwrap()))
}

pub fn lookup(distance_miles: f64, duration_hours: f64) -> RouteLookup {
    RouteLookup { distance_miles, duration_hours, waypoints: Vec::new() }
}

/// Answers route calls in order from a fixed script. `None` entries and calls
/// past the end of the script fail as an unreachable routing service would.
#[derive(Debug)]
pub struct ScriptedRouteProvider {
    script: Vec<Option<RouteLookup>>,
    calls: Mutex<usize>,
}

impl ScriptedRouteProvider {
    pub fn new(script: Vec<Option<RouteLookup>>) -> ScriptedRouteProvider {
        ScriptedRouteProvider { script, calls: Mutex::new(0) }
    }

    pub fn legs(to_pickup: RouteLookup, to_dropoff: RouteLookup) -> ScriptedRouteProvider {
        ScriptedRouteProvider::new(vec![Some(to_pickup), Some(to_dropoff)])
    }
}

impl RouteProvider for ScriptedRouteProvider {
    fn route(&self, _from: &Location, _to: &Location) -> Result<RouteLookup> {
        let mut calls = self.calls.lock().unwrap();
        let call = *calls;
        *calls += 1;

        match self.script.get(call) {
            Some(Some(route)) => Ok(route.clone()),
            _ => Err(Error::RoutingUnavailable(format!("scripted failure on call {}", call + 1))),
        }
    }
}

/// Repository with driver "1" (Ann) and vehicle "1".
pub fn seeded_repository() -> InMemoryFleetRepository {
    let mut repository = InMemoryFleetRepository::new();
    repository.insert_driver(NewDriverDto { name: "Ann Driver".to_string(), license_number: "IL-123".to_string() }).unwrap();
    repository.insert_vehicle(NewVehicleDto { car_number: "TRK-1".to_string(), brand: Some("Volvo".to_string()), ..Default::default() }).unwrap();
    repository
}

pub fn service(router: ScriptedRouteProvider, time_source: Arc<dyn TimeSource>, rules: RuleConstants) -> TripService<InMemoryFleetRepository> {
    TripService::new(seeded_repository(), Box::new(router), time_source, rules)
}

pub fn request(date: Option<&str>) -> TripRequestDto {
    TripRequestDto {
        driver_id: EntityRefDto::Number(1),
        vehicle_id: EntityRefDto::Text("1".to_string()),
        date: date.map(str::to_string),
        current_location: CURRENT,
        pickup_location: PICKUP,
        dropoff_location: DROPOFF,
    }
}
