//! Great-circle distance on a spherical Earth.

use crate::domain::Coordinate;

/// Mean Earth radius in meters (IUGG value).
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
///
/// Uses the spherical-Earth approximation. Accuracy is well within a
/// fraction of a percent at city scale, which is all the ranking
/// needs; the formula is numerically stable for nearby points, unlike
/// the spherical law of cosines.
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}
