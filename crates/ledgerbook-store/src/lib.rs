//! World state for ledgerbook.
//!
//! This crate is the gateway between the record-keeping contract and the
//! key-value store that holds its records. It provides:
//!
//! - [`WorldState`]: the backend trait (point reads, range scans, commits)
//! - [`TxContext`]: the per-invocation view exposing single-key `get`, `put`,
//!   `delete` and `range_scan`, buffering writes until commit
//! - [`WriteSet`]: an invocation's read observations and pending mutations
//! - [`RocksWorldState`] (feature `rocksdb-backend`) and [`MemoryWorldState`]
//!
//! # Commit model
//!
//! Writes made through a [`TxContext`] are invisible to other invocations until
//! the context commits. The backend then checks, under its commit lock, that
//! every key the invocation read still holds the value it saw, and applies all
//! mutations in one atomic write. A stale read fails the whole commit with
//! [`StoreError::Conflict`].
//!
//! # Example
//!
//! ```
//! use ledgerbook_store::{MemoryWorldState, TxContext, WorldState};
//!
//! let state = MemoryWorldState::new();
//! let ctx = TxContext::new(&state);
//! ctx.put("User_1", b"...".to_vec()).unwrap();
//! ctx.commit().unwrap();
//!
//! assert!(state.get("User_1").unwrap().is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod error;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;
pub mod write_set;

pub use context::TxContext;
pub use error::{Result, StoreError};
pub use memory::MemoryWorldState;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksWorldState;
pub use write_set::{Mutation, WriteSet};

/// A finite, single-pass sequence of `(key, value)` pairs in key order.
///
/// Dropping the iterator releases whatever the backend holds for it.
pub type StateIter<'a> = Box<dyn Iterator<Item = Result<(String, Vec<u8>)>> + 'a>;

/// The storage trait behind every invocation.
///
/// Implementations hold committed state only; per-invocation buffering lives
/// in [`TxContext`].
pub trait WorldState: Send + Sync {
    /// Read the committed value of a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Scan committed keys in `[start, end)`.
    ///
    /// An empty `start` means the beginning of the key space and an empty `end`
    /// means its end.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan cannot be started. Failures while iterating
    /// surface as `Err` items.
    fn range_scan(&self, start: &str, end: &str) -> Result<StateIter<'_>>;

    /// Validate the write set's reads and apply its mutations atomically.
    ///
    /// # Errors
    ///
    /// - `StoreError::Conflict` if a key read by the invocation has changed.
    /// - `StoreError::Database` if the backend write fails.
    fn commit(&self, write_set: WriteSet) -> Result<()>;

    /// Write one key outside any invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut write_set = WriteSet::new();
        write_set.put(key, value);
        self.commit(write_set)
    }

    /// Remove one key outside any invocation. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn delete(&self, key: &str) -> Result<()> {
        let mut write_set = WriteSet::new();
        write_set.delete(key);
        self.commit(write_set)
    }
}
