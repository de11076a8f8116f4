//! Per-session memoization of the occupancy feed.
//!
//! The feed is fetched lazily on first need within a session and the
//! outcome, success or failure, is held for the rest of the session.
//! A failed fetch is not silently retried on later calls: callers see
//! the same failure until someone explicitly forces a refresh. The
//! cache belongs to one session's state, so nothing is shared across
//! sessions.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::client::FeedClient;
use super::error::FeedError;
use super::mock::MockFeedSource;
use super::snapshot::FeedSnapshot;

/// The memoized result of a feed fetch.
///
/// Both arms are cheaply cloneable so every caller in the session can
/// share the one outcome.
pub type FetchOutcome = Result<Arc<FeedSnapshot>, Arc<FeedError>>;

/// Where the cache gets its data.
///
/// Enum rather than a trait object because the fetch is async.
#[derive(Debug, Clone)]
pub enum FeedProvider {
    Http(FeedClient),
    Mock(MockFeedSource),
}

impl FeedProvider {
    async fn fetch(&self) -> Result<FeedSnapshot, FeedError> {
        let records = match self {
            FeedProvider::Http(client) => client.fetch_all().await?,
            FeedProvider::Mock(mock) => mock.fetch_all().await?,
        };
        Ok(FeedSnapshot::from_records(records))
    }
}

/// One session's feed cache.
pub struct FeedCache {
    provider: FeedProvider,
    slot: Mutex<Option<FetchOutcome>>,
}

impl FeedCache {
    /// Create an empty cache backed by the given provider.
    pub fn new(provider: FeedProvider) -> Self {
        Self {
            provider,
            slot: Mutex::new(None),
        }
    }

    /// Get the session's snapshot, fetching it on first call.
    ///
    /// The slot lock is held across the fetch so concurrent first
    /// callers within a session share one fetch instead of racing.
    pub async fn get(&self) -> FetchOutcome {
        let mut slot = self.slot.lock().await;

        if let Some(outcome) = slot.as_ref() {
            return outcome.clone();
        }

        let outcome = self.fetch_into_outcome().await;
        *slot = Some(outcome.clone());
        outcome
    }

    /// Force a fresh fetch, replacing whatever was memoized.
    ///
    /// This is the only way to clear a cached failure (or snapshot)
    /// within a session.
    pub async fn refresh(&self) -> FetchOutcome {
        let mut slot = self.slot.lock().await;
        let outcome = self.fetch_into_outcome().await;
        *slot = Some(outcome.clone());
        outcome
    }

    async fn fetch_into_outcome(&self) -> FetchOutcome {
        match self.provider.fetch().await {
            Ok(snapshot) => Ok(Arc::new(snapshot)),
            Err(e) => {
                tracing::warn!(error = %e, "occupancy feed fetch failed");
                Err(Arc::new(e))
            }
        }
    }
}
