//! Occupancy feed HTTP client.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::{Coordinate, StationId, StationRecord};

use super::error::FeedError;

/// Default endpoint for the Citi Bike station feed.
const DEFAULT_BASE_URL: &str = "http://www.citibikenyc.com/stations/json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default retries on transient (connect/timeout) failures.
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Time format used by `lastCommunicationTime`, e.g.
/// "2016-10-28 09:57:10 AM".
const FEED_TIME_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// Top-level shape of the feed document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationFeedDto {
    station_bean_list: Vec<StationBeanDto>,
}

/// A single station entry in the feed.
///
/// Only the fields the ranking and selection logic needs; the feed
/// carries plenty more that is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationBeanDto {
    id: i64,
    station_name: String,
    latitude: f64,
    longitude: f64,
    available_bikes: u32,
    last_communication_time: Option<String>,
}

impl StationBeanDto {
    fn into_record(self) -> StationRecord {
        let last_updated = self
            .last_communication_time
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, FEED_TIME_FORMAT).ok());

        StationRecord {
            id: StationId(self.id),
            name: self.station_name,
            coordinate: Coordinate::new(self.latitude, self.longitude),
            available_bikes: self.available_bikes,
            last_updated,
        }
    }
}

/// Parse the feed document body into station records.
fn parse_feed(body: &str) -> Result<Vec<StationRecord>, FeedError> {
    let dto: StationFeedDto = serde_json::from_str(body).map_err(|e| FeedError::Json {
        message: e.to_string(),
    })?;

    Ok(dto
        .station_bean_list
        .into_iter()
        .map(StationBeanDto::into_record)
        .collect())
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// URL of the feed document.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries on transient failures.
    pub max_retries: u32,
}

impl FeedClientConfig {
    /// Create a config with the default endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom feed URL (for testing or other systems).
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

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// HTTP client for the station occupancy feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_retries: config.max_retries,
        })
    }

    /// Fetch the full station list.
    ///
    /// Transient failures (connect errors, timeouts) are retried up to
    /// the configured count; everything else fails immediately.
    pub async fn fetch_all(&self) -> Result<Vec<StationRecord>, FeedError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(records) => return Ok(records),
                Err(FeedError::Http(e))
                    if (e.is_timeout() || e.is_connect()) && attempt < self.max_retries =>
                {
                    attempt += 1;
                    tracing::debug!(attempt, "retrying feed fetch after transient error");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self) -> Result<Vec<StationRecord>, FeedError> {
        let response = self.http.get(&self.base_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_feed(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FeedClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn config_builder() {
        let config = FeedClientConfig::new()
            .with_base_url("http://localhost:9999/feed.json")
            .with_timeout(3)
            .with_max_retries(0);

        assert_eq!(config.base_url, "http://localhost:9999/feed.json");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn parse_feed_document() {
        let json = r#"{
            "executionTime": "2016-10-28 09:57:12 AM",
            "stationBeanList": [
                {
                    "id": 72,
                    "stationName": "W 52 St & 11 Ave",
                    "availableDocks": 27,
                    "totalDocks": 39,
                    "latitude": 40.76727216,
                    "longitude": -73.99392888,
                    "statusValue": "In Service",
                    "availableBikes": 12,
                    "lastCommunicationTime": "2016-10-28 09:57:10 AM"
                },
                {
                    "id": 79,
                    "stationName": "Franklin St & W Broadway",
                    "latitude": 40.71911552,
                    "longitude": -74.00666661,
                    "availableBikes": 0,
                    "lastCommunicationTime": null
                }
            ]
        }"#;

        let records = parse_feed(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, StationId(72));
        assert_eq!(records[0].name, "W 52 St & 11 Ave");
        assert_eq!(records[0].available_bikes, 12);
        assert!(records[0].last_updated.is_some());

        assert_eq!(records[1].id, StationId(79));
        assert_eq!(records[1].available_bikes, 0);
        assert!(records[1].last_updated.is_none());
    }

    #[test]
    fn parse_feed_rejects_malformed_document() {
        assert!(parse_feed("not json").is_err());
        assert!(parse_feed(r#"{"stations": []}"#).is_err());
    }

    #[test]
    fn unparseable_timestamp_becomes_none() {
        let json = r#"{
            "stationBeanList": [
                {
                    "id": 1,
                    "stationName": "x",
                    "latitude": 40.0,
                    "longitude": -74.0,
                    "availableBikes": 1,
                    "lastCommunicationTime": "yesterday-ish"
                }
            ]
        }"#;

        let records = parse_feed(json).unwrap();
        assert!(records[0].last_updated.is_none());
    }
}
