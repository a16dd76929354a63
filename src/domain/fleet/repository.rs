use std::collections::BTreeMap;
use std::path::Path;

use crate::api::fleet_dto::{FleetSnapshotDto, NewDriverDto, NewVehicleDto};
use crate::domain::duty_log::duty_entry::DutyEntry;
use crate::domain::fleet::driver::Driver;
use crate::domain::fleet::trip::Trip;
use crate::domain::fleet::vehicle::Vehicle;
use crate::domain::utils::id::{DriverId, TripId, VehicleId};
use crate::error::{Error, Result};
use crate::loader::parser::{parse_json_file, write_json_file};

/// Storage boundary for drivers, vehicles and trips with their duty logs.
///
/// `save_trip` stores a trip and its whole log in one step: it either succeeds
/// completely or leaves the repository untouched.
pub trait FleetRepository: std::fmt::Debug + Send + Sync {
    fn driver(&self, id: &DriverId) -> Result<Driver>;

    fn vehicle(&self, id: &VehicleId) -> Result<Vehicle>;

    fn drivers(&self) -> Vec<Driver>;

    fn vehicles(&self) -> Vec<Vehicle>;

    fn insert_driver(&mut self, draft: NewDriverDto) -> Result<Driver>;

    fn insert_vehicle(&mut self, draft: NewVehicleDto) -> Result<Vehicle>;

    fn trip(&self, id: &TripId) -> Result<Trip>;

    /// All duty entries of all trips of the driver.
    fn driver_log_history(&self, id: &DriverId) -> Result<Vec<DutyEntry>>;

    fn save_trip(&mut self, trip: Trip) -> Result<()>;
}

/// Ordered in-memory store, persisted as a JSON snapshot.
///
/// Drivers and vehicles get sequential numeric ids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFleetRepository {
    drivers: BTreeMap<DriverId, Driver>,
    vehicles: BTreeMap<VehicleId, Vehicle>,
    trips: BTreeMap<TripId, Trip>,
    next_driver_seq: u64,
    next_vehicle_seq: u64,
}

impl InMemoryFleetRepository {
    pub fn new() -> InMemoryFleetRepository {
        InMemoryFleetRepository { next_driver_seq: 1, next_vehicle_seq: 1, ..Default::default() }
    }

    pub fn from_snapshot(snapshot: FleetSnapshotDto) -> InMemoryFleetRepository {
        let next_driver_seq = next_sequence(snapshot.drivers.iter().map(|d| d.id.as_str()));
        let next_vehicle_seq = next_sequence(snapshot.vehicles.iter().map(|v| v.id.as_str()));

        InMemoryFleetRepository {
            drivers: snapshot.drivers.into_iter().map(|d| (d.id.clone(), d)).collect(),
            vehicles: snapshot.vehicles.into_iter().map(|v| (v.id.clone(), v)).collect(),
            trips: snapshot.trips.into_iter().map(|t| (t.id.clone(), t)).collect(),
            next_driver_seq,
            next_vehicle_seq,
        }
    }

    pub fn snapshot(&self) -> FleetSnapshotDto {
        FleetSnapshotDto {
            drivers: self.drivers.values().cloned().collect(),
            vehicles: self.vehicles.values().cloned().collect(),
            trips: self.trips.values().cloned().collect(),
        }
    }

    pub fn load(file_path: impl AsRef<Path>) -> Result<InMemoryFleetRepository> {
        let snapshot: FleetSnapshotDto = parse_json_file(file_path.as_ref())?;
        log::info!(
            "Loaded fleet store '{}': {} drivers, {} vehicles, {} trips",
            file_path.as_ref().display(),
            snapshot.drivers.len(),
            snapshot.vehicles.len(),
            snapshot.trips.len()
        );
        Ok(InMemoryFleetRepository::from_snapshot(snapshot))
    }

    /// Loads the store, or starts an empty one when the file does not exist yet.
    pub fn load_or_default(file_path: impl AsRef<Path>) -> Result<InMemoryFleetRepository> {
        if file_path.as_ref().exists() {
            InMemoryFleetRepository::load(file_path)
        } else {
            log::info!("Fleet store '{}' does not exist yet, starting empty", file_path.as_ref().display());
            Ok(InMemoryFleetRepository::new())
        }
    }

    pub fn save(&self, file_path: impl AsRef<Path>) -> Result<()> {
        write_json_file(file_path.as_ref(), &self.snapshot())?;
        log::info!("Saved fleet store to '{}'", file_path.as_ref().display());
        Ok(())
    }
}

fn next_sequence<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.parse::<u64>().ok()).max().map_or(1, |max| max + 1)
}

impl FleetRepository for InMemoryFleetRepository {
    fn driver(&self, id: &DriverId) -> Result<Driver> {
        self.drivers.get(id).cloned().ok_or_else(|| Error::EntityNotFound { kind: "Driver", id: id.to_string() })
    }

    fn vehicle(&self, id: &VehicleId) -> Result<Vehicle> {
        self.vehicles.get(id).cloned().ok_or_else(|| Error::EntityNotFound { kind: "Vehicle", id: id.to_string() })
    }

    fn drivers(&self) -> Vec<Driver> {
        self.drivers.values().cloned().collect()
    }

    fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.values().cloned().collect()
    }

    fn insert_driver(&mut self, draft: NewDriverDto) -> Result<Driver> {
        if self.drivers.values().any(|d| d.license_number == draft.license_number) {
            return Err(Error::DuplicateEntity { kind: "License number", key: draft.license_number });
        }

        let driver = Driver { id: DriverId::new(self.next_driver_seq.to_string()), name: draft.name, license_number: draft.license_number };
        self.next_driver_seq += 1;
        self.drivers.insert(driver.id.clone(), driver.clone());

        Ok(driver)
    }

    fn insert_vehicle(&mut self, draft: NewVehicleDto) -> Result<Vehicle> {
        if self.vehicles.values().any(|v| v.car_number == draft.car_number) {
            return Err(Error::DuplicateEntity { kind: "Car number", key: draft.car_number });
        }

        let vehicle = Vehicle {
            id: VehicleId::new(self.next_vehicle_seq.to_string()),
            car_number: draft.car_number,
            brand: draft.brand,
            model: draft.model,
            year: draft.year,
        };
        self.next_vehicle_seq += 1;
        self.vehicles.insert(vehicle.id.clone(), vehicle.clone());

        Ok(vehicle)
    }

    fn trip(&self, id: &TripId) -> Result<Trip> {
        self.trips.get(id).cloned().ok_or_else(|| Error::EntityNotFound { kind: "Trip", id: id.to_string() })
    }

    fn driver_log_history(&self, id: &DriverId) -> Result<Vec<DutyEntry>> {
        self.driver(id)?;
        Ok(self.trips.values().filter(|trip| &trip.driver_id == id).flat_map(|trip| trip.logs.iter().cloned()).collect())
    }

    fn save_trip(&mut self, trip: Trip) -> Result<()> {
        self.driver(&trip.driver_id)?;
        self.vehicle(&trip.vehicle_id)?;
        if self.trips.contains_key(&trip.id) {
            return Err(Error::DuplicateEntity { kind: "Trip", key: trip.id.to_string() });
        }

        log::debug!("Storing trip {} with {} duty entries", trip.id, trip.logs.len());
        self.trips.insert(trip.id.clone(), trip);
        Ok(())
    }
}
