//! Hash-index entries.

use serde::{Deserialize, Serialize};

use crate::ids::{TxHash, UserId};
use crate::keys::Namespace;
use crate::record::Record;

/// Maps a transaction hash to the user whose record embeds it.
///
/// Written in the same invocation as the transaction append. Without it the
/// transaction cannot be found by hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashIndex {
    /// Transaction hash (also the key).
    pub hash: TxHash,

    /// Owning user.
    pub user_id: UserId,
}

impl Record for HashIndex {
    type Id = TxHash;
    const NAMESPACE: Namespace = Namespace::HashIndex;

    fn id(&self) -> &TxHash {
        &self.hash
    }
}
