//! Error types for the world state.

use ledgerbook_core::LedgerError;

/// Result type for world-state operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in world-state operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A key read during the invocation changed before its writes committed.
    #[error("read conflict on key {key}")]
    Conflict {
        /// The key whose committed value no longer matches what was read.
        key: String,
    },
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
