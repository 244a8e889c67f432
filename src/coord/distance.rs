//! Great-circle distance

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::Coordinates;
use std::f64::consts::PI;

/// Calculate the distance between two points in meters (Haversine formula)
///
/// # Arguments
/// * `p1` - First point
/// * `p2` - Second point
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat * PI / 180.0;
    let lat2 = p2.lat * PI / 180.0;
    let delta_lat = (p2.lat - p1.lat) * PI / 180.0;
    let delta_lng = (p2.lng - p1.lng) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
