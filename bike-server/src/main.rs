use std::net::SocketAddr;
use std::sync::Arc;

use bike_server::config::SkillConfig;
use bike_server::domain::{Coordinate, StationId, StationRecord, SystemId};
use bike_server::feed::{FeedClient, FeedClientConfig, FeedProvider, MockFeedSource};
use bike_server::geocode::{
    GeocodeClient, GeocodeClientConfig, GeocodeProvider, GeocodedAddress, MockGeocoder,
};
use bike_server::handler::TurnHandler;
use bike_server::locale::citibike_table;
use bike_server::session::{SessionStore, SessionStoreConfig};
use bike_server::storage::DiskAddressStore;
use bike_server::web::{AppState, create_router};

/// Where address records live unless overridden.
const DEFAULT_DATA_DIR: &str = "data/addresses";

/// Default bind address.
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bike_server=info".into()),
        )
        .init();

    let mock_mode = std::env::var("MOCK_MODE").is_ok_and(|v| v == "1" || v == "true");

    let (geocoder, feed) = if mock_mode {
        println!("MOCK_MODE set: serving canned geocoding and feed data.");
        (mock_geocoder(), FeedProvider::Mock(mock_feed()))
    } else {
        // Get the geocoding API key from the environment
        let api_key = std::env::var("GEOCODE_API_KEY").unwrap_or_else(|_| {
            eprintln!("Warning: GEOCODE_API_KEY not set. Address lookups will fail.");
            String::new()
        });

        let geocode_config = GeocodeClientConfig::new(&api_key);
        let geocoder = GeocodeProvider::Http(
            GeocodeClient::new(geocode_config).expect("Failed to create geocoding client"),
        );

        // Occupancy feed client, with an optional URL override
        let mut feed_config = FeedClientConfig::new();
        if let Ok(url) = std::env::var("FEED_URL") {
            feed_config = feed_config.with_base_url(url);
        }
        let feed = FeedProvider::Http(
            FeedClient::new(feed_config).expect("Failed to create feed client"),
        );

        (geocoder, feed)
    };

    // Address persistence on disk
    let data_dir =
        std::env::var("ADDRESS_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let store = Arc::new(DiskAddressStore::new(&data_dir));

    // Per-session dialogue state and feed caches
    let sessions = SessionStore::new(feed, &SessionStoreConfig::default());

    let handler = TurnHandler::new(
        store,
        geocoder,
        citibike_table(),
        sessions,
        SystemId::citibike(),
        SkillConfig::default(),
    );

    // Build app state and router
    let state = AppState::new(handler);
    let app = create_router(state);

    // Bind and serve
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND.to_string())
        .parse()
        .expect("BIND_ADDR is not a valid socket address");
    println!("Bike station finder listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health - Health check");
    println!("  POST /turn   - Handle one conversational turn");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Canned geocoder for keyless development: knows one Manhattan address.
fn mock_geocoder() -> GeocodeProvider {
    GeocodeProvider::Mock(MockGeocoder::new([(
        "350 5th Avenue, 10118".to_string(),
        GeocodedAddress {
            latitude: 40.748_44,
            longitude: -73.985_66,
            formatted_address: "350 5th Ave, New York, NY 10118, USA".to_string(),
            administrative_locale: Some("New York County".to_string()),
        },
    )]))
}

/// Canned midtown stations for keyless development.
fn mock_feed() -> MockFeedSource {
    MockFeedSource::new(vec![
        StationRecord {
            id: StationId(153),
            name: "E 40 St & 5 Ave".to_string(),
            coordinate: Coordinate::new(40.752_62, -73.980_86),
            available_bikes: 2,
            last_updated: None,
        },
        StationRecord {
            id: StationId(477),
            name: "W 41 St & 8 Ave".to_string(),
            coordinate: Coordinate::new(40.756_41, -73.990_04),
            available_bikes: 0,
            last_updated: None,
        },
        StationRecord {
            id: StationId(72),
            name: "W 52 St & 11 Ave".to_string(),
            coordinate: Coordinate::new(40.767_27, -73.993_93),
            available_bikes: 12,
            last_updated: None,
        },
    ])
}
