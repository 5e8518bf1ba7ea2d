//! Bank operations.

use ledgerbook_core::{Bank, BankId, Result};

use crate::repository::Repository;

impl Repository<'_, Bank> {
    /// Create a bank with a zero transaction count.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyExists` if the id is taken.
    pub fn create(&self, id: BankId, name: &str) -> Result<Bank> {
        let bank = Bank::new(id, name);
        self.insert(&bank)?;
        tracing::info!(bank_id = %bank.id, "Bank created");
        Ok(bank)
    }

    /// Add one to a bank's transaction count.
    ///
    /// Returns the new count, or `None` if the bank does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the bank cannot be read or written.
    pub fn count_transaction(&self, id: &BankId) -> Result<Option<u64>> {
        let Some(mut bank) = self.find(id)? else {
            return Ok(None);
        };
        let count = bank.record_transaction();
        self.put(&bank)?;
        Ok(Some(count))
    }
}
