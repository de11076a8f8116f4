//! Mock geocoder for testing without API access.

use std::collections::HashMap;
use std::sync::Arc;

use super::error::GeocodeError;
use super::types::GeocodedAddress;

/// Mock geocoder backed by an in-memory query table.
///
/// Lookup is by exact query string; unknown queries are a no-match,
/// mimicking the real client's `Ok(None)`.
#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    answers: Arc<HashMap<String, GeocodedAddress>>,
    fail: bool,
}

impl MockGeocoder {
    /// Create a mock from (query, answer) pairs.
    pub fn new(answers: impl IntoIterator<Item = (String, GeocodedAddress)>) -> Self {
        Self {
            answers: Arc::new(answers.into_iter().collect()),
            fail: false,
        }
    }

    /// Create a mock whose every lookup fails.
    pub fn failing() -> Self {
        Self {
            answers: Arc::new(HashMap::new()),
            fail: true,
        }
    }

    /// Look up a canned answer, mimicking `GeocodeClient::geocode`.
    pub async fn geocode(&self, query: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
        if self.fail {
            return Err(GeocodeError::Api {
                status: "UNKNOWN_ERROR".to_string(),
                message: "mock geocoder failure".to_string(),
            });
        }

        Ok(self.answers.get(query).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer() -> GeocodedAddress {
        GeocodedAddress {
            latitude: 40.7484,
            longitude: -73.9857,
            formatted_address: "350 5th Ave, New York, NY 10118, USA".to_string(),
            administrative_locale: Some("New York County".to_string()),
        }
    }

    #[tokio::test]
    async fn known_query_resolves() {
        let mock = MockGeocoder::new([("350 5th Ave 10118".to_string(), answer())]);

        let result = mock.geocode("350 5th Ave 10118").await.unwrap();
        assert_eq!(result, Some(answer()));
    }

    #[tokio::test]
    async fn unknown_query_is_no_match() {
        let mock = MockGeocoder::new([]);
        assert_eq!(mock.geocode("nowhere at all").await.unwrap(), None);
    }

    #[tokio::test]
    async fn failing_mock_errors() {
        let mock = MockGeocoder::failing();
        assert!(mock.geocode("anything").await.is_err());
    }
}
