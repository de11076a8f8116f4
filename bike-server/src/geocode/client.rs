//! Geocoding HTTP client.

use super::error::GeocodeError;
use super::types::{GeocodeResponse, GeocodedAddress};

/// Default base URL for the Google Geocoding API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default retries on transient (connect/timeout) failures.
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeClientConfig {
    /// API key, sent as the `key` query parameter.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries on transient failures.
    pub max_retries: u32,
}

impl GeocodeClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the transient-failure retry count.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// Client for the geocoding API.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_retries: u32,
}

impl GeocodeClient {
    /// Create a new geocoding client.
    pub fn new(config: GeocodeClientConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            max_retries: config.max_retries,
        })
    }

    /// Geocode a free-form address string.
    ///
    /// Returns `Ok(None)` when the API finds no match; errors are
    /// reserved for the request itself failing. Transient failures
    /// are retried up to the configured count.
    pub async fn geocode(&self, query: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
        let mut attempt = 0;
        loop {
            match self.geocode_once(query).await {
                Ok(result) => return Ok(result),
                Err(GeocodeError::Http(e))
                    if (e.is_timeout() || e.is_connect()) && attempt < self.max_retries =>
                {
                    attempt += 1;
                    tracing::debug!(attempt, "retrying geocode after transient error");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn geocode_once(&self, query: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("address", query), ("key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16().to_string(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: format!("{e} (body: {})", body.chars().take(500).collect::<String>()),
            })?;

        match parsed.status.as_str() {
            "OK" => Ok(parsed
                .results
                .into_iter()
                .next()
                .map(|r| r.into_geocoded())),
            // No match is a domain outcome, not an error.
            "ZERO_RESULTS" => Ok(None),
            "REQUEST_DENIED" => Err(GeocodeError::Denied),
            "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(GeocodeError::QuotaExceeded),
            other => Err(GeocodeError::Api {
                status: other.to_string(),
                message: parsed.error_message.unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeocodeClientConfig::new("test-key");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn config_builder() {
        let config = GeocodeClientConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(5)
            .with_max_retries(0);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn client_creation() {
        let client = GeocodeClient::new(GeocodeClientConfig::new("test-key"));
        assert!(client.is_ok());
    }
}
