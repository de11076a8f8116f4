//! Address storage error types.

/// Errors that can occur when loading or saving an address record.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("storage I/O error: {message}")]
    Io { message: String },

    /// Stored record could not be parsed
    #[error("corrupt address record: {message}")]
    Corrupt { message: String },

    /// Record could not be serialized for writing
    #[error("failed to serialize address record: {message}")]
    Serialize { message: String },
}
