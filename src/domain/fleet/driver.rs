use serde::{Deserialize, Serialize};

use crate::domain::utils::id::DriverId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub license_number: String,
}
