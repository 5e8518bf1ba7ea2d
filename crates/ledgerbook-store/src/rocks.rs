//! `RocksDB` world state implementation.
//!
//! This module provides the `RocksWorldState` implementation of the `WorldState` trait.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, ReadOptions, WriteBatch,
};

use crate::error::{Result, StoreError};
use crate::schema::{all_column_families, cf};
use crate::write_set::{Mutation, WriteSet};
use crate::{StateIter, WorldState};

/// RocksDB-backed world state.
pub struct RocksWorldState {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes validate-then-write so a read set cannot go stale mid-commit.
    commit_lock: Mutex<()>,
}

impl RocksWorldState {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            commit_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }
}

impl WorldState for RocksWorldState {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self.cf(cf::WORLD_STATE)?;

        self.db
            .get_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<StateIter<'_>> {
        let cf = self.cf(cf::WORLD_STATE)?;

        let mut read_opts = ReadOptions::default();
        if !end.is_empty() {
            read_opts.set_iterate_upper_bound(end.as_bytes().to_vec());
        }

        let mode = if start.is_empty() {
            IteratorMode::Start
        } else {
            IteratorMode::From(start.as_bytes(), Direction::Forward)
        };

        let iter = self.db.iterator_cf_opt(&cf, read_opts, mode).map(|item| {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let key = String::from_utf8(key.into_vec())
                .map_err(|e| StoreError::Database(format!("non-UTF-8 key: {e}")))?;
            Ok((key, value.into_vec()))
        });

        Ok(Box::new(iter))
    }

    fn commit(&self, write_set: WriteSet) -> Result<()> {
        let cf = self.cf(cf::WORLD_STATE)?;
        let _guard = self
            .commit_lock
            .lock()
            .map_err(|_| StoreError::Database("commit lock poisoned".into()))?;

        // Validate the read set against committed state
        for (key, observed) in write_set.reads() {
            let current = self
                .db
                .get_cf(&cf, key.as_bytes())
                .map_err(|e| StoreError::Database(e.to_string()))?;

            if current.as_deref() != observed {
                tracing::debug!(key, "Read set is stale, rejecting commit");
                return Err(StoreError::Conflict {
                    key: key.to_string(),
                });
            }
        }

        let mut batch = WriteBatch::default();
        for (key, mutation) in write_set.writes() {
            match mutation {
                Mutation::Put(value) => batch.put_cf(&cf, key.as_bytes(), value),
                Mutation::Delete => batch.delete_cf(&cf, key.as_bytes()),
            }
        }

        // Write atomically
        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::trace!(writes = write_set.len(), "Committed write set");
        Ok(())
    }
}
