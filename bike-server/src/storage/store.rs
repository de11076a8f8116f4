//! Address store implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::domain::Address;

use super::error::StorageError;

/// Whole-record address persistence.
///
/// `save` must replace the user's record atomically: a reader never
/// observes a mix of old and new fields, and a failed save leaves the
/// old record intact. The trait is sync and object-safe so it can sit
/// behind an `Arc<dyn AddressStore>`.
pub trait AddressStore: Send + Sync {
    /// Load the user's address, or `None` if they have never saved one.
    fn load(&self, user_id: &str) -> Result<Option<Address>, StorageError>;

    /// Replace the user's address record.
    fn save(&self, user_id: &str, address: &Address) -> Result<(), StorageError>;
}

/// Disk-backed store: one JSON file per user.
#[derive(Debug)]
pub struct DiskAddressStore {
    dir: PathBuf,
}

impl DiskAddressStore {
    /// Create a store rooted at `dir`. The directory is created on
    /// first save if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory records live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_user_id(user_id)))
    }
}

/// Map a platform user id to a safe filename stem.
///
/// User ids look like "amzn1.ask.account.AB12..."; anything outside
/// ASCII alphanumerics is folded to '_'.
fn sanitize_user_id(user_id: &str) -> String {
    user_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

impl AddressStore for DiskAddressStore {
    fn load(&self, user_id: &str) -> Result<Option<Address>, StorageError> {
        let path = self.record_path(user_id);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Io {
                    message: format!("failed to read {:?}: {e}", path),
                });
            }
        };

        let address = serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt {
            message: format!("{:?}: {e}", path),
        })?;

        Ok(Some(address))
    }

    fn save(&self, user_id: &str, address: &Address) -> Result<(), StorageError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::Io {
                message: format!("failed to create {:?}: {e}", self.dir),
            })?;
        }

        let json =
            serde_json::to_string_pretty(address).map_err(|e| StorageError::Serialize {
                message: e.to_string(),
            })?;

        let path = self.record_path(user_id);

        // Write to a sibling temp file and rename over the old record,
        // so the replace is atomic and a crash mid-write cannot corrupt
        // the stored address.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StorageError::Io {
            message: format!("failed to write {:?}: {e}", tmp),
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| StorageError::Io {
            message: format!("failed to replace {:?}: {e}", path),
        })?;

        Ok(())
    }
}

/// In-memory store for tests and keyless development.
#[derive(Debug, Default)]
pub struct MemoryAddressStore {
    records: RwLock<HashMap<String, Address>>,
}

impl MemoryAddressStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddressStore for MemoryAddressStore {
    fn load(&self, user_id: &str) -> Result<Option<Address>, StorageError> {
        let records = self.records.read().map_err(|_| StorageError::Io {
            message: "address store lock poisoned".to_string(),
        })?;
        Ok(records.get(user_id).cloned())
    }

    fn save(&self, user_id: &str, address: &Address) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| StorageError::Io {
            message: "address store lock poisoned".to_string(),
        })?;
        records.insert(user_id.to_string(), address.clone());
        Ok(())
    }
}
