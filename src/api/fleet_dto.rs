use serde::{Deserialize, Serialize};

use crate::domain::fleet::driver::Driver;
use crate::domain::fleet::trip::Trip;
use crate::domain::fleet::vehicle::Vehicle;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewDriverDto {
    pub name: String,
    pub license_number: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NewVehicleDto {
    pub car_number: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

/// On-disk snapshot of a fleet repository.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FleetSnapshotDto {
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub trips: Vec<Trip>,
}
