//! Key encoding for the world state.
//!
//! All record families share one key space. Each family owns a fixed prefix,
//! and scans are bounded to `[prefix, successor(prefix))` so that listing users
//! never touches bank or index entries.

use crate::error::Entity;

/// A record family's slice of the key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `User_` + user id.
    User,
    /// `Bank_` + bank id.
    Bank,
    /// `File_` + file id.
    File,
    /// `TxHash_` + transaction hash.
    HashIndex,
}

impl Namespace {
    /// Every namespace, in key order.
    pub const ALL: [Self; 4] = [Self::Bank, Self::File, Self::HashIndex, Self::User];

    /// The key prefix for this namespace.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::User => "User_",
            Self::Bank => "Bank_",
            Self::File => "File_",
            Self::HashIndex => "TxHash_",
        }
    }

    /// The entity reported in errors for keys of this namespace.
    #[must_use]
    pub const fn entity(self) -> Entity {
        match self {
            Self::User => Entity::User,
            Self::Bank => Entity::Bank,
            Self::File => Entity::File,
            Self::HashIndex => Entity::Transaction,
        }
    }

    /// Build the full key for an id in this namespace.
    #[must_use]
    pub fn key(self, id: &str) -> String {
        let prefix = self.prefix();
        let mut key = String::with_capacity(prefix.len() + id.len());
        key.push_str(prefix);
        key.push_str(id);
        key
    }

    /// Strip this namespace's prefix from a key, if it belongs here.
    #[must_use]
    pub fn id_of(self, key: &str) -> Option<&str> {
        key.strip_prefix(self.prefix())
    }

    /// Exclusive upper bound of this namespace: the prefix with its trailing
    /// `_` bumped to `` ` ``, the smallest string above every prefixed key.
    #[must_use]
    pub const fn range_end(self) -> &'static str {
        match self {
            Self::User => "User`",
            Self::Bank => "Bank`",
            Self::File => "File`",
            Self::HashIndex => "TxHash`",
        }
    }

    /// Half-open scan range `[start, end)` covering exactly this namespace.
    #[must_use]
    pub fn range(self) -> (String, String) {
        (self.prefix().to_string(), self.range_end().to_string())
    }
}
