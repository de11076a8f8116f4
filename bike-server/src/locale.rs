//! Service-area gating by administrative locale.
//!
//! Geocoding returns an administrative locale (a county/borough name);
//! a bike-share system only serves addresses inside its allowed set.
//! Pure lookup, no I/O.

use std::collections::{HashMap, HashSet};

use crate::domain::SystemId;

/// Mapping of bike-share system to the locales it serves.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    allowed: HashMap<SystemId, HashSet<String>>,
}

impl LocaleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow a locale for a system.
    pub fn allow(&mut self, system: SystemId, locale: impl Into<String>) {
        self.allowed.entry(system).or_default().insert(locale.into());
    }

    /// Is `locale` inside the allowed set for `system`?
    ///
    /// Unknown systems are never supported.
    pub fn is_supported(&self, system: &SystemId, locale: &str) -> bool {
        self.allowed
            .get(system)
            .is_some_and(|set| set.contains(locale))
    }

    /// Number of systems in the table.
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    /// Returns true if no systems are registered.
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

/// The default table: Citi Bike serves the five boroughs of New York
/// City, named as the counties geocoding reports.
pub fn citibike_table() -> LocaleTable {
    let mut table = LocaleTable::new();
    let citibike = SystemId::citibike();
    for county in [
        "New York County",
        "Kings County",
        "Queens County",
        "Richmond County",
        "Bronx County",
    ] {
        table.allow(citibike.clone(), county);
    }
    table
}
