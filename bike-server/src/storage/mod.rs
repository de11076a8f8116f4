//! Persistence of user address records.
//!
//! Records are replaced whole or not at all; there is no field-by-field
//! merge, so a failed save never leaves a half-written address behind.

mod error;
mod store;

pub use error::StorageError;
pub use store::{AddressStore, DiskAddressStore, MemoryAddressStore};
