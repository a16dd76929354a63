use reqwest::blocking::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::domain::location::Location;
use crate::domain::routing::route_provider::{RouteLookup, RouteProvider};
use crate::error::{Error, Result};

pub const DEFAULT_GRAPHHOPPER_URL: &str = "https://graphhopper.com/api/1/route";

const METERS_PER_MILE: f64 = 1609.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Routes through the GraphHopper routing API (car profile).
pub struct GraphHopperRouteProvider {
    client: Client,
    url: String,
    api_key: String,
}

impl GraphHopperRouteProvider {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Result<GraphHopperRouteProvider> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::RoutingUnavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(GraphHopperRouteProvider { client, url: url.into(), api_key: api_key.into() })
    }
}

impl fmt::Debug for GraphHopperRouteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphHopperRouteProvider").field("url", &self.url).finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct GraphHopperResponse {
    paths: Vec<GraphHopperPath>,
}

#[derive(Debug, Deserialize)]
struct GraphHopperPath {
    /// Meters.
    distance: f64,
    /// Milliseconds.
    time: f64,
    points: GraphHopperPoints,
}

#[derive(Debug, Deserialize)]
struct GraphHopperPoints {
    /// `[lng, lat]` or `[lng, lat, elevation]`.
    coordinates: Vec<Vec<f64>>,
}

/// Converts a GraphHopper response body (unencoded points) into a lookup.
pub fn parse_route_response(body: &str) -> Result<RouteLookup> {
    let response: GraphHopperResponse = serde_json::from_str(body).map_err(|e| Error::RoutingUnavailable(format!("unexpected response shape: {}", e)))?;
    let path = response.paths.into_iter().next().ok_or_else(|| Error::RoutingUnavailable("response contains no path".to_string()))?;

    let waypoints = path
        .points
        .coordinates
        .iter()
        .map(|point| match point.as_slice() {
            [lng, lat, ..] => Location::new(*lat, *lng).map_err(|e| Error::RoutingUnavailable(e.to_string())),
            _ => Err(Error::RoutingUnavailable(format!("malformed coordinate {:?}", point))),
        })
        .collect::<Result<Vec<Location>>>()?;

    RouteLookup { distance_miles: path.distance / METERS_PER_MILE, duration_hours: path.time / MILLIS_PER_HOUR, waypoints }.validated()
}

impl RouteProvider for GraphHopperRouteProvider {
    fn route(&self, from: &Location, to: &Location) -> Result<RouteLookup> {
        let from_point = format!("{},{}", from.lat, from.lng);
        let to_point = format!("{},{}", to.lat, to.lng);

        log::debug!("Requesting GraphHopper route {} -> {}", from_point, to_point);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("point", from_point.as_str()),
                ("point", to_point.as_str()),
                ("profile", "car"),
                ("instructions", "true"),
                ("locale", "en"),
                ("calc_points", "true"),
                ("points_encoded", "false"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| Error::RoutingUnavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().map_err(|e| Error::RoutingUnavailable(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            log::error!("GraphHopper route {} -> {} failed with status {}: {}", from_point, to_point, status, body);
            return Err(Error::RoutingUnavailable(format!("routing service answered {}", status)));
        }

        parse_route_response(&body)
    }
}
