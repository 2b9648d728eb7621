//! Great-circle distance and travel-time estimation.
//!
//! All distances are in meters and all legs are point-to-point straight
//! lines. The app never follows road geometry for its own math; an external
//! directions provider supplies that when available.

use crate::model::Coordinate;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters-to-miles conversion factor.
const MILES_PER_METER: f64 = 0.000_621_371;

/// Assumed average travel speed when the caller does not supply one.
pub const DEFAULT_SPEED_MPH: f64 = 55.0;

/// Great-circle distance between two coordinates, in meters.
///
/// Symmetric, zero for identical coordinates, and monotonic with angular
/// separation. Never fails: malformed coordinates give odd distances, not
/// errors.
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_M * c
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters * MILES_PER_METER
}

/// Travel time in whole minutes at the given speed, rounded to nearest.
pub fn estimate_travel_minutes(miles: f64, speed_mph: f64) -> i64 {
    (miles / speed_mph * 60.0).round() as i64
}
