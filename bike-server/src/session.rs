//! Per-session state.
//!
//! Each voice session owns its conversation state and its one-shot
//! feed cache. Sessions are keyed by the platform session id and
//! TTL-evicted, so an abandoned dialogue (and any stashed candidate
//! address or in-flight resolution outcome) simply ages out; nothing
//! is shared between sessions.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;

use crate::dialogue::AcquisitionState;
use crate::feed::{FeedCache, FeedProvider};

/// State scoped to one voice session.
pub struct Session {
    /// The acquisition dialogue machine.
    pub dialogue: Mutex<AcquisitionState>,

    /// The session's memoized occupancy feed.
    pub feed: FeedCache,
}

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionStoreConfig {
    /// How long an idle session's state is kept.
    pub ttl: Duration,

    /// Maximum number of live sessions.
    pub max_capacity: u64,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Store of live sessions.
pub struct SessionStore {
    sessions: MokaCache<String, Arc<Session>>,
    feed_provider: FeedProvider,
}

impl SessionStore {
    /// Create a store whose sessions fetch the feed from `provider`.
    pub fn new(feed_provider: FeedProvider, config: &SessionStoreConfig) -> Self {
        let sessions = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            sessions,
            feed_provider,
        }
    }

    /// Get the session's state, creating it on first sight.
    pub async fn get_or_create(&self, session_id: &str) -> Arc<Session> {
        self.sessions
            .get_with(session_id.to_string(), async {
                Arc::new(Session {
                    dialogue: Mutex::new(AcquisitionState::new()),
                    feed: FeedCache::new(self.feed_provider.clone()),
                })
            })
            .await
    }

    /// Discard a session's state (the platform told us it ended).
    pub async fn end(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
    }

    /// Number of live sessions (for monitoring).
    pub fn live_sessions(&self) -> u64 {
        self.sessions.entry_count()
    }
}
