//! The `Record` trait tying a stored type to its namespace.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::keys::Namespace;

/// A record kept under its own key in the world state.
pub trait Record: Serialize + DeserializeOwned {
    /// Identifier type addressing this record.
    type Id: AsRef<str>;

    /// Namespace the record's key lives in.
    const NAMESPACE: Namespace;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// Full world-state key for an identifier.
    fn key_for(id: &Self::Id) -> String {
        Self::NAMESPACE.key(id.as_ref())
    }

    /// Full world-state key for this record.
    fn key(&self) -> String {
        Self::key_for(self.id())
    }
}
