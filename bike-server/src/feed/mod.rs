//! Live occupancy feed: HTTP client, per-session cache, and snapshot.
//!
//! The feed is a JSON document listing every station in the system
//! with its current bike count. It is fetched lazily at most once per
//! session and memoized (failures included) for the rest of that
//! session.

mod cache;
mod client;
mod error;
mod mock;
mod snapshot;

pub use cache::{FeedCache, FeedProvider, FetchOutcome};
pub use client::{FeedClient, FeedClientConfig};
pub use error::FeedError;
pub use mock::MockFeedSource;
pub use snapshot::FeedSnapshot;
