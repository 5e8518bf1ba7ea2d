//! Transaction recording.
//!
//! Recording touches three keys: the owning user (transaction appended), the
//! hash index (hash mapped to the user) and the bank (counter bumped). All
//! three writes are staged in the invocation's context, so they commit
//! together or not at all.
//!
//! Recording is not idempotent. Repeating a hash appends a second copy to the
//! user, re-points the index entry and counts the bank again.

use ledgerbook_core::{Bank, BankId, HashIndex, Result, Transaction, TxHash, User, UserId};
use ledgerbook_store::TxContext;
use serde::{Deserialize, Serialize};

use crate::repository::Repository;

/// What a successful recording changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordReceipt {
    /// User the transaction was appended to.
    pub user_id: UserId,
    /// Hash now indexed to `user_id`.
    pub hash: TxHash,
    /// Bank named by the caller.
    pub bank_id: BankId,
    /// Length of the user's transaction list after the append.
    pub user_transaction_count: usize,
    /// The bank's new count, or `None` when the bank does not exist.
    pub bank_transaction_count: Option<u64>,
}

impl RecordReceipt {
    /// Whether the bank's counter was incremented.
    #[must_use]
    pub fn bank_counted(&self) -> bool {
        self.bank_transaction_count.is_some()
    }
}

/// Append `transaction` to `user_id`, index its hash and count it against `bank_id`.
///
/// An unknown bank does not fail the recording; the receipt reports
/// `bank_transaction_count: None` instead.
///
/// # Errors
///
/// - `LedgerError::NotFound` if the user does not exist. Nothing is staged.
/// - Any read, decode or encode failure aborts the remaining steps.
pub fn record_transaction(
    ctx: &TxContext<'_>,
    user_id: &UserId,
    transaction: Transaction,
    bank_id: &BankId,
) -> Result<RecordReceipt> {
    let users = Repository::<User>::new(ctx);
    let mut user = users.get(user_id)?;

    let hash = transaction.hash.clone();
    user.transactions.push(transaction);
    users.put(&user)?;

    Repository::<HashIndex>::new(ctx).put(&HashIndex {
        hash: hash.clone(),
        user_id: user_id.clone(),
    })?;

    let bank_transaction_count = Repository::<Bank>::new(ctx).count_transaction(bank_id)?;
    match bank_transaction_count {
        Some(count) => tracing::info!(
            user_id = %user_id,
            hash = %hash,
            bank_id = %bank_id,
            bank_transaction_count = count,
            "Transaction recorded"
        ),
        None => tracing::warn!(
            user_id = %user_id,
            hash = %hash,
            bank_id = %bank_id,
            "Transaction recorded against unknown bank, counter not incremented"
        ),
    }

    Ok(RecordReceipt {
        user_id: user_id.clone(),
        hash,
        bank_id: bank_id.clone(),
        user_transaction_count: user.transactions.len(),
        bank_transaction_count,
    })
}
