//! Generic record repository.

use std::marker::PhantomData;

use ledgerbook_core::{codec, LedgerError, Record, Result};
use ledgerbook_store::TxContext;

/// Key-addressed access to one record family within an invocation.
pub struct Repository<'c, R> {
    pub(crate) ctx: &'c TxContext<'c>,
    _record: PhantomData<fn() -> R>,
}

impl<'c, R: Record> Repository<'c, R> {
    /// Bind a repository to an invocation.
    #[must_use]
    pub fn new(ctx: &'c TxContext<'c>) -> Self {
        Self {
            ctx,
            _record: PhantomData,
        }
    }

    /// Whether a value is stored under the record's key.
    ///
    /// A present but undecodable value still counts as existing.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::StoreUnavailable` if the read fails.
    pub fn exists(&self, id: &R::Id) -> Result<bool> {
        Ok(self.ctx.get(&R::key_for(id))?.is_some())
    }

    /// Read a record if present.
    ///
    /// # Errors
    ///
    /// - `LedgerError::StoreUnavailable` if the read fails.
    /// - `LedgerError::MalformedRecord` if the stored bytes do not decode.
    pub fn find(&self, id: &R::Id) -> Result<Option<R>> {
        let key = R::key_for(id);
        self.ctx
            .get(&key)?
            .map(|data| codec::decode(&key, &data))
            .transpose()
    }

    /// Read a record that must be present.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if absent, otherwise as [`Repository::find`].
    pub fn get(&self, id: &R::Id) -> Result<R> {
        self.find(id)?
            .ok_or_else(|| LedgerError::not_found(R::NAMESPACE.entity(), id.as_ref()))
    }

    /// Write a record whose key must not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyExists` if the key is taken.
    pub fn insert(&self, record: &R) -> Result<()> {
        if self.exists(record.id())? {
            return Err(LedgerError::already_exists(
                R::NAMESPACE.entity(),
                record.id().as_ref(),
            ));
        }
        self.put(record)
    }

    /// Write a record, replacing whatever is stored under its key.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Serialization` if the record cannot be encoded.
    pub fn put(&self, record: &R) -> Result<()> {
        let value = codec::encode(record)?;
        self.ctx.put(&record.key(), value)?;
        Ok(())
    }

    /// Remove a record that must be present.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if absent.
    pub fn remove(&self, id: &R::Id) -> Result<()> {
        if !self.exists(id)? {
            return Err(LedgerError::not_found(R::NAMESPACE.entity(), id.as_ref()));
        }
        self.ctx.delete(&R::key_for(id))?;
        Ok(())
    }

    /// Every record of this family, in key order.
    ///
    /// Scans only this family's namespace. Records written earlier in the same
    /// invocation are not included.
    ///
    /// # Errors
    ///
    /// - `LedgerError::StoreUnavailable` if the scan fails.
    /// - `LedgerError::MalformedRecord` on the first value that does not decode.
    pub fn list_all(&self) -> Result<Vec<R>> {
        let (start, end) = R::NAMESPACE.range();
        self.ctx
            .range_scan(&start, &end)?
            .map(|item| {
                let (key, value) = item?;
                codec::decode(&key, &value)
            })
            .collect()
    }
}
