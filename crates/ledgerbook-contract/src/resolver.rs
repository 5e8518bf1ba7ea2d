//! Lookup of a transaction's owner by hash.

use ledgerbook_core::{HashIndex, Result, TxHash, User};
use ledgerbook_store::TxContext;

use crate::repository::Repository;

/// Resolve the user that owns the transaction with `hash`.
///
/// # Errors
///
/// - `LedgerError::NotFound` for the transaction if the hash is not indexed.
/// - `LedgerError::NotFound` for the user if the index points at a user that
///   no longer exists.
pub fn resolve_by_hash(ctx: &TxContext<'_>, hash: &TxHash) -> Result<User> {
    let entry = Repository::<HashIndex>::new(ctx).get(hash)?;
    tracing::debug!(hash = %hash, user_id = %entry.user_id, "Hash index resolved");
    Repository::<User>::new(ctx).get(&entry.user_id)
}
