use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::location_dto::LocationDto;

/// Trip-creation request. Field names are snake_case, camelCase aliases are
/// accepted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TripRequestDto {
    #[serde(alias = "driverId")]
    pub driver_id: EntityRefDto,
    #[serde(alias = "vehicleId")]
    pub vehicle_id: EntityRefDto,
    /// `YYYY-MM-DD`, today when absent.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(alias = "currentLocation")]
    pub current_location: LocationDto,
    #[serde(alias = "pickupLocation")]
    pub pickup_location: LocationDto,
    #[serde(alias = "dropoffLocation")]
    pub dropoff_location: LocationDto,
}

/// Entity reference given either as a number or as a string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum EntityRefDto {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntityRefDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRefDto::Number(n) => write!(f, "{}", n),
            EntityRefDto::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DriverHoursDto {
    pub driver_name: String,
    pub available_hours: f64,
}
