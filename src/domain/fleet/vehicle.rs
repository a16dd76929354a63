use serde::{Deserialize, Serialize};

use crate::domain::utils::id::VehicleId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub car_number: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}
