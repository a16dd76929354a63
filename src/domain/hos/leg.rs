use crate::domain::location::{Location, interpolate_along};
use crate::domain::routing::route_provider::RouteLookup;
use crate::error::{Error, Result};

/// One planned point-to-point movement of a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub origin: Location,
    pub destination: Location,
    pub distance_miles: f64,
    pub duration_hours: f64,
    /// Ordered points along the road, possibly empty.
    pub waypoints: Vec<Location>,
    /// The leg is driven by someone other than the logging driver.
    pub off_duty_transit: bool,
    /// Appended to remarks, e.g. "to pickup location".
    pub description: String,
}

impl Leg {
    pub fn from_route(origin: Location, destination: Location, route: RouteLookup, description: impl Into<String>, off_duty_transit: bool) -> Leg {
        Leg {
            origin,
            destination,
            distance_miles: route.distance_miles,
            duration_hours: route.duration_hours,
            waypoints: route.waypoints,
            off_duty_transit,
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.distance_miles.is_finite() || self.distance_miles < 0.0 {
            return Err(Error::InvalidLeg(format!("distance {} {} must be a non-negative number of miles", self.description, self.distance_miles)));
        }
        if !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            return Err(Error::InvalidLeg(format!("duration {} {} must be a positive number of hours", self.description, self.duration_hours)));
        }
        Ok(())
    }

    /// Zero distance in zero time: the vehicle is already at the destination.
    pub fn is_stationary(&self) -> bool {
        self.distance_miles == 0.0 && self.duration_hours == 0.0
    }

    /// Position after covering `progress` (0..=1) of the leg. Follows the
    /// waypoints when there are any, the straight line between the endpoints
    /// otherwise.
    pub fn location_at(&self, progress: f64) -> Location {
        interpolate_along(&self.waypoints, progress).unwrap_or_else(|| self.origin.lerp(&self.destination, progress))
    }
}
