//! File operations.

use ledgerbook_core::{File, FileId, Result};

use crate::repository::Repository;

impl Repository<'_, File> {
    /// Register a file.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyExists` if the id is taken.
    pub fn create(&self, id: FileId, file_name: &str, hash: &str, time: &str) -> Result<File> {
        let file = File {
            id,
            file_name: file_name.to_string(),
            hash: hash.to_string(),
            time: time.to_string(),
        };
        self.insert(&file)?;
        tracing::info!(file_id = %file.id, "File created");
        Ok(file)
    }
}
