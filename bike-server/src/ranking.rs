//! Station ranking by distance from an origin.
//!
//! Produces the nearest-stations list that is persisted alongside a
//! resolved address. Output is deterministic for a fixed feed
//! ordering: the sort is stable, so equidistant stations keep their
//! feed order.

use crate::domain::{Coordinate, StationRecord, StationRef};
use crate::geo::haversine_meters;

/// Rank stations by great-circle distance from `origin`, ascending,
/// and return the first `k` as `StationRef`s.
///
/// An empty station list yields an empty result, not an error.
pub fn rank(stations: &[StationRecord], origin: Coordinate, k: usize) -> Vec<StationRef> {
    let mut refs: Vec<StationRef> = stations
        .iter()
        .map(|s| StationRef {
            id: s.id,
            name: s.name.clone(),
            distance_meters: haversine_meters(origin, s.coordinate),
        })
        .collect();

    // sort_by is stable: ties preserve feed order.
    refs.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    refs.truncate(k);
    refs
}
