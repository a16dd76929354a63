use std::sync::Arc;

use crate::api::fleet_dto::{NewDriverDto, NewVehicleDto};
use crate::api::trip_dto::{DriverHoursDto, TripRequestDto};
use crate::domain::fleet::driver::Driver;
use crate::domain::fleet::repository::FleetRepository;
use crate::domain::fleet::trip::Trip;
use crate::domain::fleet::vehicle::Vehicle;
use crate::domain::hos::availability::available_hours;
use crate::domain::hos::clock;
use crate::domain::hos::leg::Leg;
use crate::domain::hos::rules::RuleConstants;
use crate::domain::hos::scheduler::{TripLegs, TripScheduler};
use crate::domain::location::Location;
use crate::domain::routing::route_provider::RouteProvider;
use crate::domain::time_source::TimeSource;
use crate::domain::utils::id::{DriverId, TripId, VehicleId};
use crate::error::Result;

pub const TO_PICKUP: &str = "to pickup location";
pub const TO_DROPOFF: &str = "to dropoff location";

/// Trip planning use cases on top of a fleet repository and a routing backend.
#[derive(Debug)]
pub struct TripService<R: FleetRepository> {
    repository: R,
    router: Box<dyn RouteProvider>,
    time_source: Arc<dyn TimeSource>,
    rules: RuleConstants,
}

impl<R: FleetRepository> TripService<R> {
    pub fn new(repository: R, router: Box<dyn RouteProvider>, time_source: Arc<dyn TimeSource>, rules: RuleConstants) -> TripService<R> {
        TripService { repository, router, time_source, rules }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    pub fn rules(&self) -> &RuleConstants {
        &self.rules
    }

    /// Plans a trip and stores it with its duty log.
    ///
    /// The trip starts on the requested date at the current time of day. Every
    /// check and the whole log generation happen before the single
    /// `save_trip` call, so a failed request stores nothing.
    pub fn create_trip(&mut self, request: TripRequestDto) -> Result<Trip> {
        let date = clock::resolve_date(request.date.as_deref(), self.time_source.as_ref())?;
        let current = Location::from_dto(&request.current_location)?;
        let pickup = Location::from_dto(&request.pickup_location)?;
        let dropoff = Location::from_dto(&request.dropoff_location)?;

        let driver = self.repository.driver(&DriverId::new(request.driver_id.to_string()))?;
        let vehicle = self.repository.vehicle(&VehicleId::new(request.vehicle_id.to_string()))?;

        log::info!("Planning trip for driver {} ({}) with vehicle {} on {}", driver.id, driver.name, vehicle.car_number, date);

        let to_pickup = self.router.route(&current, &pickup)?;
        let to_dropoff = self.router.route(&pickup, &dropoff)?;
        let legs = TripLegs {
            to_pickup: Leg::from_route(current, pickup, to_pickup, TO_PICKUP, true),
            to_dropoff: Leg::from_route(pickup, dropoff, to_dropoff, TO_DROPOFF, false),
        };

        let history = self.repository.driver_log_history(&driver.id)?;
        let start = clock::combine(date, self.time_source.time_of_day());
        let schedule = TripScheduler::new(&self.rules).schedule_trip(&history, &legs, pickup, dropoff, start)?;

        let trip = Trip {
            id: TripId::generate(),
            driver_id: driver.id,
            vehicle_id: vehicle.id,
            date,
            end_date: schedule.end_date,
            current_location: current,
            pickup_location: pickup,
            dropoff_location: dropoff,
            distance_miles: schedule.distance_miles,
            estimated_duration_hours: schedule.estimated_duration_hours,
            created_at: self.time_source.now(),
            logs: schedule.entries,
        };

        self.repository.save_trip(trip.clone())?;
        log::info!("Trip {} saved: {:.1} miles, {} to {}", trip.id, trip.distance_miles, trip.date, trip.end_date);

        Ok(trip)
    }

    /// Hours the driver may still work in the rolling window ending on the
    /// given date (today when absent).
    pub fn driver_hours(&self, driver_id: &DriverId, reference_date: Option<&str>) -> Result<DriverHoursDto> {
        let reference = clock::resolve_date(reference_date, self.time_source.as_ref())?;
        let driver = self.repository.driver(driver_id)?;
        let history = self.repository.driver_log_history(driver_id)?;

        Ok(DriverHoursDto { driver_name: driver.name, available_hours: available_hours(&history, reference, &self.rules) })
    }

    pub fn trip(&self, trip_id: &TripId) -> Result<Trip> {
        self.repository.trip(trip_id)
    }

    pub fn drivers(&self) -> Vec<Driver> {
        self.repository.drivers()
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.repository.vehicles()
    }

    pub fn register_driver(&mut self, draft: NewDriverDto) -> Result<Driver> {
        let driver = self.repository.insert_driver(draft)?;
        log::info!("Registered driver {} ({})", driver.id, driver.name);
        Ok(driver)
    }

    pub fn register_vehicle(&mut self, draft: NewVehicleDto) -> Result<Vehicle> {
        let vehicle = self.repository.insert_vehicle(draft)?;
        log::info!("Registered vehicle {} ({})", vehicle.id, vehicle.car_number);
        Ok(vehicle)
    }
}
