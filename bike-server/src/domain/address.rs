//! The persisted home address record.

use serde::{Deserialize, Serialize};

use super::station::{Coordinate, StationId};
use super::system::SystemId;

/// A reference to a station, precomputed at address-resolution time.
///
/// The distance is measured from the address coordinates and goes
/// stale only when the address changes; occupancy is looked up fresh
/// by `id` on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRef {
    pub id: StationId,
    pub name: String,
    pub distance_meters: f64,
}

/// A user's resolved home address together with its nearest stations.
///
/// Owned by the user's persisted record. Mutated only by the
/// acquisition flow on successful resolution, and always replaced
/// whole: a resolution either fully replaces the prior address and
/// station list or changes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Sorted ascending by distance, capped at the configured k.
    pub closest_stations: Vec<StationRef>,
    pub system: SystemId,
}

impl Address {
    /// The address coordinates as a `Coordinate`.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
