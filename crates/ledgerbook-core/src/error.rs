//! Error types for ledgerbook.

use std::fmt;

use crate::ids::IdError;

/// Result type for ledgerbook operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// The record family an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A `User` record.
    User,
    /// A `Bank` record.
    Bank,
    /// A `File` record.
    File,
    /// A hash-index entry, addressed by transaction hash.
    Transaction,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Bank => "bank",
            Self::File => "file",
            Self::Transaction => "transaction",
        })
    }
}

/// Errors that can occur in ledgerbook operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A create targeted a key that is already present.
    #[error("the {entity} {id} already exists")]
    AlreadyExists {
        /// Record family.
        entity: Entity,
        /// The offending identifier.
        id: String,
    },

    /// A read, update, delete or index lookup targeted an absent key.
    #[error("the {entity} {id} does not exist")]
    NotFound {
        /// Record family.
        entity: Entity,
        /// The offending identifier.
        id: String,
    },

    /// The world state rejected or failed a get, put, delete, scan or commit.
    #[error("world state unavailable: {0}")]
    StoreUnavailable(String),

    /// Stored bytes did not decode into the expected record shape.
    #[error("malformed {entity} record at {key}: {reason}")]
    MalformedRecord {
        /// Record family that was expected.
        entity: Entity,
        /// Key the bytes were read from.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// A record or payload could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An argument was not a valid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// The invoked operation name is not part of the contract.
    #[error("function {0} not found in contract")]
    UnknownFunction(String),

    /// The invocation carried the wrong number of arguments.
    #[error("incorrect number of arguments for {function}: expected {expected}, received {received}")]
    ArgumentCount {
        /// Operation name.
        function: &'static str,
        /// Arguments the operation takes.
        expected: usize,
        /// Arguments supplied.
        received: usize,
    },
}

impl LedgerError {
    /// Shorthand for [`LedgerError::NotFound`].
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Shorthand for [`LedgerError::AlreadyExists`].
    pub fn already_exists(entity: Entity, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.into(),
        }
    }

    /// Whether this is a `NotFound` error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
