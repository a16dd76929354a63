use serde::{Deserialize, Serialize};

use crate::domain::location::Location;
use crate::error::{Error, Result};

/// Distance, travel time and road geometry between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLookup {
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub waypoints: Vec<Location>,
}

impl RouteLookup {
    /// Rejects lookups a provider should never have produced.
    pub fn validated(self) -> Result<RouteLookup> {
        if !self.distance_miles.is_finite() || self.distance_miles < 0.0 {
            return Err(Error::RoutingUnavailable(format!("route distance {} is not a valid number of miles", self.distance_miles)));
        }
        if !self.duration_hours.is_finite() || self.duration_hours < 0.0 {
            return Err(Error::RoutingUnavailable(format!("route duration {} is not a valid number of hours", self.duration_hours)));
        }
        Ok(self)
    }
}

/// Routing backend turning two coordinates into a [`RouteLookup`].
///
/// Calls are synchronous and are not retried; a failure surfaces as
/// `Error::RoutingUnavailable`.
pub trait RouteProvider: std::fmt::Debug + Send + Sync {
    fn route(&self, from: &Location, to: &Location) -> Result<RouteLookup>;
}
