use serde::{Deserialize, Serialize};

use crate::api::location_dto::LocationDto;
use crate::error::{Error, Result};

const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A `{lat, lng}` coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Validated constructor. Rejects non-finite values and coordinates outside
    /// the WGS84 ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Location> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(Error::InvalidLocation(format!("coordinates must be finite numbers, got ({}, {})", lat, lng)));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidLocation(format!("latitude {} is outside [-90, 90]", lat)));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidLocation(format!("longitude {} is outside [-180, 180]", lng)));
        }

        Ok(Location { lat, lng })
    }

    pub fn from_dto(dto: &LocationDto) -> Result<Location> {
        Location::new(dto.lat, dto.lng)
    }

    /// Point at `ratio` on the straight segment from `self` to `other`.
    pub fn lerp(&self, other: &Location, ratio: f64) -> Location {
        let ratio = clamp_ratio(ratio);
        Location { lat: self.lat + (other.lat - self.lat) * ratio, lng: self.lng + (other.lng - self.lng) * ratio }
    }

    /// Great-circle (haversine) distance in miles.
    pub fn distance_miles(&self, other: &Location) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_MILES * a.sqrt().asin()
    }
}

fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) }
}

/// Point at `ratio` of the polyline's length, measured along its segments.
///
/// Returns `None` for an empty polyline. A polyline without length (one point,
/// or all points identical) yields its first point.
pub fn interpolate_along(points: &[Location], ratio: f64) -> Option<Location> {
    let first = *points.first()?;
    let ratio = clamp_ratio(ratio);

    let segment_lengths: Vec<f64> = points.windows(2).map(|pair| pair[0].distance_miles(&pair[1])).collect();
    let total: f64 = segment_lengths.iter().sum();
    if total <= 0.0 {
        return Some(first);
    }

    let mut remaining = total * ratio;
    for (pair, length) in points.windows(2).zip(segment_lengths) {
        if remaining <= length {
            let local = if length > 0.0 { remaining / length } else { 0.0 };
            return Some(pair[0].lerp(&pair[1], local));
        }
        remaining -= length;
    }

    points.last().copied()
}
