//! Geocoding client error types.

/// Errors that can occur when calling the geocoding API.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API key rejected
    #[error("geocoding request denied: check GEOCODE_API_KEY")]
    Denied,

    /// Query quota exhausted
    #[error("geocoding quota exceeded")]
    QuotaExceeded,

    /// API returned an error status
    #[error("geocoding error {status}: {message}")]
    Api { status: String, message: String },

    /// Failed to parse the response JSON
    #[error("geocoding JSON parse error: {message}")]
    Json { message: String },
}
