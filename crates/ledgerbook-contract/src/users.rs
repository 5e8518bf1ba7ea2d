//! User operations.

use ledgerbook_core::{HashIndex, Result, User, UserId};

use crate::repository::Repository;

impl Repository<'_, User> {
    /// Create a user with an empty transaction list.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyExists` if the id is taken.
    pub fn create(&self, id: UserId, name: &str, email: &str) -> Result<User> {
        let user = User::new(id, name, email);
        self.insert(&user)?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Replace a user's name and email. The id and transactions are untouched.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the user does not exist.
    pub fn update(&self, id: &UserId, name: &str, email: &str) -> Result<User> {
        let mut user = self.get(id)?;
        user.name = name.to_string();
        user.email = email.to_string();
        self.put(&user)?;
        tracing::info!(user_id = %id, "User updated");
        Ok(user)
    }

    /// Delete a user together with the hash-index entries that point at it.
    ///
    /// Entries for the user's hashes that were since re-pointed at another
    /// user are left alone. Returns how many index entries were removed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the user does not exist.
    pub fn delete(&self, id: &UserId) -> Result<usize> {
        let user = self.get(id)?;
        let index = Repository::<HashIndex>::new(self.ctx);

        let mut removed = 0;
        for tx in &user.transactions {
            let owned = index
                .find(&tx.hash)?
                .is_some_and(|entry| &entry.user_id == id);
            if owned {
                index.remove(&tx.hash)?;
                removed += 1;
            }
        }

        self.remove(id)?;
        tracing::info!(user_id = %id, index_entries = removed, "User deleted");
        Ok(removed)
    }
}
