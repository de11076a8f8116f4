//! Availability selection over the ranked station list.
//!
//! Decides which of a user's nearest stations to announce, and in what
//! order. The policy stops at the first well-stocked station but peeks
//! ahead (a bounded number of times) past nearly-empty ones, so the
//! user hears a fallback when the closest option might run dry.

use crate::domain::{StationId, StationRef};
use crate::feed::FeedSnapshot;

/// Tunables for the low-stock continuation policy.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    /// A station with this many bikes or fewer counts as low stock.
    pub low_threshold: u32,

    /// How many extra stations may be announced past low-stock ones.
    pub max_additional: u32,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            low_threshold: 3,
            max_additional: 2,
        }
    }
}

/// A station chosen for announcement.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncedStation {
    pub id: StationId,
    pub name: String,
    pub available_bikes: u32,

    /// True when this station was reached by peeking past a low-stock
    /// one; it gets the "next closest station" phrasing.
    pub follow_up: bool,

    /// True when this station itself is at or below the low threshold.
    pub low_stock: bool,
}

/// The outcome of a selection walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Stations to announce, in announcement order.
    pub announced: Vec<AnnouncedStation>,

    /// False when no ranked station had any bikes.
    pub any_available: bool,

    /// How many extra (post-low-stock) announcements were emitted.
    pub extra_emitted: u32,
}

/// Walk the ranked stations against the live snapshot and pick what to
/// announce.
///
/// Stations missing from the snapshot are skipped silently; so are
/// stations with zero bikes. Neither affects the extra-station budget.
pub fn select(closest: &[StationRef], feed: &FeedSnapshot, policy: &SelectionPolicy) -> Selection {
    let mut announced = Vec::new();
    let mut extra_emitted: u32 = 0;
    let mut awaiting_follow_up = false;

    for station in closest {
        // Dropped from the live feed: not an error anywhere in the system.
        let Some(record) = feed.get(station.id) else {
            continue;
        };

        if record.available_bikes == 0 {
            continue;
        }

        let low_stock = record.available_bikes <= policy.low_threshold;

        announced.push(AnnouncedStation {
            id: record.id,
            name: record.name.clone(),
            available_bikes: record.available_bikes,
            follow_up: awaiting_follow_up,
            low_stock,
        });
        awaiting_follow_up = false;

        if low_stock && extra_emitted < policy.max_additional {
            awaiting_follow_up = true;
            extra_emitted += 1;
            continue;
        }

        // Ample bikes, or the additional-station budget is spent.
        break;
    }

    Selection {
        any_available: !announced.is_empty(),
        announced,
        extra_emitted,
    }
}
