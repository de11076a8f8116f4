//! A point-in-time view of the occupancy feed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{StationId, StationRecord};

/// One fetched occupancy snapshot, indexed by station id.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    fetched_at: DateTime<Utc>,
    records: Vec<StationRecord>,
    index: HashMap<StationId, usize>,
}

impl FeedSnapshot {
    /// Build a snapshot from fetched records, timestamped now.
    ///
    /// If the feed repeats an id, the first occurrence wins, matching
    /// the feed-order determinism of ranking.
    pub fn from_records(records: Vec<StationRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            index.entry(record.id).or_insert(i);
        }

        Self {
            fetched_at: Utc::now(),
            records,
            index,
        }
    }

    /// Look up a station by id.
    pub fn get(&self, id: StationId) -> Option<&StationRecord> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    /// All records, in feed order.
    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    /// When this snapshot was fetched.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Number of stations in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the snapshot has no stations.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
