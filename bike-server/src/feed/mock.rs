//! Mock feed source for testing without network access.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::StationRecord;

use super::error::FeedError;

/// Mock feed that serves canned station records.
///
/// Counts fetches so tests can assert the cache really memoizes, and
/// can be told to fail to exercise the cached-failure path.
#[derive(Debug, Clone)]
pub struct MockFeedSource {
    records: Arc<Vec<StationRecord>>,
    fail: bool,
    fetches: Arc<AtomicUsize>,
}

impl MockFeedSource {
    /// Create a mock serving the given records.
    pub fn new(records: Vec<StationRecord>) -> Self {
        Self {
            records: Arc::new(records),
            fail: false,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock whose every fetch fails.
    pub fn failing() -> Self {
        Self {
            records: Arc::new(Vec::new()),
            fail: true,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fetch the canned records, mimicking `FeedClient::fetch_all`.
    pub async fn fetch_all(&self) -> Result<Vec<StationRecord>, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(FeedError::Api {
                status: 503,
                message: "mock feed failure".to_string(),
            });
        }

        Ok(self.records.as_ref().clone())
    }

    /// How many times `fetch_all` has been called.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}
