//! Geocoding API response DTOs and the resolved-address result.
//!
//! DTOs map the Google Geocoding JSON API. `Option` is used liberally:
//! the API omits fields rather than sending null in many cases.

use serde::Deserialize;

/// A successfully geocoded address, reduced to what the skill needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: String,
    /// The level-2 administrative area (a county name in the US), used
    /// for service-area gating. Absent for some address types.
    pub administrative_locale: Option<String>,
}

/// Top-level geocoding response.
#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One geocoding result.
#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Geometry {
    pub location: Location,
}

#[derive(Debug, Deserialize)]
pub(super) struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl GeocodeResult {
    /// Reduce a raw result to the fields the skill uses.
    pub(super) fn into_geocoded(self) -> GeocodedAddress {
        let administrative_locale = self
            .address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == "administrative_area_level_2"))
            .map(|c| c.long_name.clone());

        GeocodedAddress {
            latitude: self.geometry.location.lat,
            longitude: self.geometry.location.lng,
            formatted_address: self.formatted_address,
            administrative_locale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_and_reduce_result() {
        let json = r#"{
            "status": "OK",
            "results": [
                {
                    "formatted_address": "350 5th Ave, New York, NY 10118, USA",
                    "geometry": {
                        "location": {"lat": 40.7484405, "lng": -73.9856644}
                    },
                    "address_components": [
                        {"long_name": "350", "short_name": "350", "types": ["street_number"]},
                        {"long_name": "5th Avenue", "short_name": "5th Ave", "types": ["route"]},
                        {"long_name": "New York County", "short_name": "New York County",
                         "types": ["administrative_area_level_2", "political"]}
                    ]
                }
            ]
        }"#;

        let response: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "OK");

        let geocoded = response.results.into_iter().next().unwrap().into_geocoded();
        assert_eq!(geocoded.latitude, 40.7484405);
        assert_eq!(geocoded.longitude, -73.9856644);
        assert_eq!(
            geocoded.formatted_address,
            "350 5th Ave, New York, NY 10118, USA"
        );
        assert_eq!(
            geocoded.administrative_locale.as_deref(),
            Some("New York County")
        );
    }

    #[test]
    fn deserialize_zero_results() {
        let json = r#"{"status": "ZERO_RESULTS", "results": []}"#;
        let response: GeocodeResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.status, "ZERO_RESULTS");
        assert!(response.results.is_empty());
    }

    #[test]
    fn missing_locale_component_is_none() {
        let json = r#"{
            "status": "OK",
            "results": [
                {
                    "formatted_address": "Somewhere",
                    "geometry": {"location": {"lat": 1.0, "lng": 2.0}},
                    "address_components": []
                }
            ]
        }"#;

        let response: GeocodeResponse = serde_json::from_str(json).unwrap();
        let geocoded = response.results.into_iter().next().unwrap().into_geocoded();
        assert!(geocoded.administrative_locale.is_none());
    }
}
