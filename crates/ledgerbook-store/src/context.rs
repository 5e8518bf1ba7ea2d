//! Per-invocation view of the world state.

use std::cell::RefCell;

use crate::error::Result;
use crate::write_set::WriteSet;
use crate::{StateIter, WorldState};

/// The world state as seen by one invocation.
///
/// Point reads see the invocation's own pending writes first and otherwise
/// the committed value, which is remembered for conflict detection. Writes are
/// buffered until [`TxContext::commit`]; dropping the context discards them.
///
/// Range scans read committed state only and are not validated at commit.
pub struct TxContext<'s> {
    state: &'s dyn WorldState,
    write_set: RefCell<WriteSet>,
}

impl<'s> TxContext<'s> {
    /// Start an invocation against `state`.
    #[must_use]
    pub fn new(state: &'s dyn WorldState) -> Self {
        Self {
            state,
            write_set: RefCell::new(WriteSet::new()),
        }
    }

    /// Read a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let pending = self.write_set.borrow().pending(key).cloned();
        if let Some(mutation) = pending {
            return Ok(mutation.into_value());
        }

        let value = self.state.get(key)?;
        self.write_set.borrow_mut().record_read(key, value.clone());
        Ok(value)
    }

    /// Stage a write of `value` under `key`.
    ///
    /// # Errors
    ///
    /// Infallible today; kept fallible to match the store boundary.
    pub fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.write_set.borrow_mut().put(key, value);
        Ok(())
    }

    /// Stage removal of `key`.
    ///
    /// # Errors
    ///
    /// Infallible today; kept fallible to match the store boundary.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.write_set.borrow_mut().delete(key);
        Ok(())
    }

    /// Scan committed keys in `[start, end)`; empty bounds are open.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan cannot be started.
    pub fn range_scan(&self, start: &str, end: &str) -> Result<StateIter<'s>> {
        self.state.range_scan(start, end)
    }

    /// Number of writes staged so far.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.write_set.borrow().len()
    }

    /// Give up the context, returning what it read and staged.
    #[must_use]
    pub fn into_write_set(self) -> WriteSet {
        self.write_set.into_inner()
    }

    /// Commit staged writes. Returns how many keys were written or deleted.
    ///
    /// A context with nothing staged commits without touching the backend.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if a key this invocation read has changed
    /// since, or `StoreError::Database` if the backend write fails.
    pub fn commit(self) -> Result<usize> {
        let state = self.state;
        let write_set = self.into_write_set();
        let written = write_set.len();
        if written > 0 {
            state.commit(write_set)?;
        }
        Ok(written)
    }
}
