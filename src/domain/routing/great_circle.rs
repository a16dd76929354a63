use crate::domain::location::Location;
use crate::domain::routing::route_provider::{RouteLookup, RouteProvider};
use crate::error::Result;

/// Offline estimate: haversine distance stretched by a winding factor, driven
/// at a constant speed. Produces no waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircleRouteProvider {
    pub speed_mph: f64,
    pub winding_factor: f64,
}

impl Default for GreatCircleRouteProvider {
    fn default() -> Self {
        GreatCircleRouteProvider { speed_mph: 55.0, winding_factor: 1.2 }
    }
}

impl RouteProvider for GreatCircleRouteProvider {
    fn route(&self, from: &Location, to: &Location) -> Result<RouteLookup> {
        let distance_miles = from.distance_miles(to) * self.winding_factor;
        RouteLookup { distance_miles, duration_hours: distance_miles / self.speed_mph, waypoints: Vec::new() }.validated()
    }
}
