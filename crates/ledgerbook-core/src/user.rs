//! User records and the transactions embedded in them.

use serde::{Deserialize, Serialize};

use crate::ids::{TxHash, UserId};
use crate::keys::Namespace;
use crate::record::Record;

/// A user and the ordered list of transactions recorded against them.
///
/// Transactions are embedded in the user record rather than stored as rows of
/// their own; the hash index points back at the owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Immutable once created.
    pub id: UserId,

    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Contact email.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,

    /// Recorded transactions, oldest first. Only ever appended to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
}

impl User {
    /// Create a user with no transactions.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            transactions: Vec::new(),
        }
    }
}

impl Record for User {
    type Id = UserId;
    const NAMESPACE: Namespace = Namespace::User;

    fn id(&self) -> &UserId {
        &self.id
    }
}

/// A transaction as embedded in its owner's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Globally unique hash (assumed, not enforced).
    pub hash: TxHash,

    /// Decimal amount kept verbatim as a string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub amount: String,

    /// Currency code, e.g. `USD`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub currency: String,

    /// Transaction date as supplied by the caller.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_no_transactions() {
        let user = User::new(UserId::new("1").unwrap(), "John Lee", "john.lee@g.com");
        assert!(user.transactions.is_empty());
        assert_eq!(user.key(), "User_1");
    }

    #[test]
    fn empty_fields_are_omitted_from_json() {
        let user = User::new(UserId::new("1").unwrap(), "John Lee", "");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "1", "name": "John Lee" }));
    }

    #[test]
    fn missing_fields_default_on_read() {
        let user: User = serde_json::from_str(r#"{"id":"2"}"#).unwrap();
        assert_eq!(user.name, "");
        assert!(user.transactions.is_empty());
    }
}
