//! Geocoding: free-form address string to coordinates and locale.
//!
//! The acquisition flow only cares about the contract: an address
//! string in, either `{latitude, longitude, formatted_address,
//! administrative_locale}` or a no-match signal out. No-match is
//! `Ok(None)`, not an error; errors are reserved for the request
//! itself going wrong.

mod client;
mod error;
mod mock;
mod types;

pub use client::{GeocodeClient, GeocodeClientConfig};
pub use error::GeocodeError;
pub use mock::MockGeocoder;
pub use types::GeocodedAddress;

/// Where geocoding results come from.
///
/// Enum rather than a trait object because the lookup is async.
#[derive(Debug, Clone)]
pub enum GeocodeProvider {
    Http(GeocodeClient),
    Mock(MockGeocoder),
}

impl GeocodeProvider {
    /// Geocode a free-form address string.
    pub async fn geocode(&self, query: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
        match self {
            GeocodeProvider::Http(client) => client.geocode(query).await,
            GeocodeProvider::Mock(mock) => mock.geocode(query).await,
        }
    }
}
