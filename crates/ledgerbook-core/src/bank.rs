//! Bank records.

use serde::{Deserialize, Serialize};

use crate::ids::BankId;
use crate::keys::Namespace;
use crate::record::Record;

/// Banks written by `InitLedger` when absent, as `(id, name)`.
pub const SEED_BANKS: [(&str, &str); 2] = [
    ("004", "Bank of Taiwan"),
    ("013", "Cathay United Bank"),
];

/// A bank and the number of transactions recorded against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    /// Bank identifier.
    pub id: BankId,

    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Successfully recorded transactions referencing this bank.
    #[serde(default)]
    pub transaction_count: u64,
}

impl Bank {
    /// Create a bank with a zero counter.
    #[must_use]
    pub fn new(id: BankId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transaction_count: 0,
        }
    }

    /// Count one more recorded transaction. Returns the new count.
    pub fn record_transaction(&mut self) -> u64 {
        self.transaction_count = self.transaction_count.saturating_add(1);
        self.transaction_count
    }
}

impl Record for Bank {
    type Id = BankId;
    const NAMESPACE: Namespace = Namespace::Bank;

    fn id(&self) -> &BankId {
        &self.id
    }
}
