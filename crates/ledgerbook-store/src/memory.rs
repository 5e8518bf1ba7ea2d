//! In-memory world state.
//!
//! Backs tests and ephemeral deployments. Keys are kept in a `BTreeMap`, so
//! scans come back in the same lexical order `RocksDB` would give.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::write_set::{Mutation, WriteSet};
use crate::{StateIter, WorldState};

/// A world state held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryWorldState {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryWorldState {
    /// Create an empty world state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries.read().map_err(poisoned)?.len())
    }

    /// True when no keys are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Database("world state lock poisoned".into())
}

impl WorldState for MemoryWorldState {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<StateIter<'_>> {
        if !end.is_empty() && start >= end {
            return Ok(Box::new(std::iter::empty()));
        }

        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start)
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end)
        };

        // Snapshot the range so the lock is not held while the caller iterates.
        let snapshot: Vec<_> = self
            .entries
            .read()
            .map_err(poisoned)?
            .range::<str, _>((lower, upper))
            .map(|(key, value)| Ok((key.clone(), value.clone())))
            .collect();

        Ok(Box::new(snapshot.into_iter()))
    }

    fn commit(&self, write_set: WriteSet) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;

        for (key, observed) in write_set.reads() {
            if entries.get(key).map(Vec::as_slice) != observed {
                return Err(StoreError::Conflict {
                    key: key.to_string(),
                });
            }
        }

        for (key, mutation) in write_set.writes() {
            match mutation {
                Mutation::Put(value) => {
                    entries.insert(key.to_string(), value.clone());
                }
                Mutation::Delete => {
                    entries.remove(key);
                }
            }
        }

        tracing::trace!(writes = write_set.len(), "Committed write set");
        Ok(())
    }
}
