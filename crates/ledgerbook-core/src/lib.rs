//! Core types for ledgerbook.
//!
//! This crate provides the records kept in the world state and the rules for
//! storing them:
//!
//! - **Identifiers**: `UserId`, `BankId`, `FileId`, `TxHash`
//! - **Records**: `User`, `Transaction`, `Bank`, `File`, `HashIndex`
//! - **Keys**: `Namespace` prefixes and scan ranges per record family
//! - **Codec**: CBOR values in the store, JSON payloads at the invocation boundary
//!
//! # Key layout
//!
//! | Record      | Key                 |
//! |-------------|---------------------|
//! | `User`      | `User_` + user id   |
//! | `Bank`      | `Bank_` + bank id   |
//! | `File`      | `File_` + file id   |
//! | `HashIndex` | `TxHash_` + hash    |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bank;
pub mod codec;
pub mod error;
pub mod file;
pub mod ids;
pub mod index;
pub mod keys;
pub mod record;
pub mod user;

pub use bank::{Bank, SEED_BANKS};
pub use error::{Entity, LedgerError, Result};
pub use file::File;
pub use ids::{BankId, FileId, IdError, TxHash, UserId};
pub use index::HashIndex;
pub use keys::Namespace;
pub use record::Record;
pub use user::{Transaction, User};
