use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::duty_log::duty_entry::DutyEntry;
use crate::domain::location::Location;
use crate::domain::utils::id::{DriverId, TripId, VehicleId};

/// A scheduled trip together with the duty log generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub driver_id: DriverId,
    pub vehicle_id: VehicleId,
    pub date: NaiveDate,
    pub end_date: NaiveDate,
    pub current_location: Location,
    pub pickup_location: Location,
    pub dropoff_location: Location,
    pub distance_miles: f64,
    pub estimated_duration_hours: f64,
    pub created_at: NaiveDateTime,
    pub logs: Vec<DutyEntry>,
}
