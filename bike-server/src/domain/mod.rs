//! Domain types for the bike-share station finder.
//!
//! Types here represent validated data: a `SystemId` is always a
//! well-formed system identifier, an `Address` always carries the
//! coordinates it was geocoded to. Code receiving these types can
//! trust their invariants.

mod address;
mod station;
mod system;

pub use address::{Address, StationRef};
pub use station::{Coordinate, StationId, StationRecord};
pub use system::{InvalidSystemId, SystemId};
