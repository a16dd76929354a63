use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LocationDto {
    pub lat: f64,
    pub lng: f64,
}
