//! Record operations for ledgerbook.
//!
//! Every operation runs as one invocation against the world state: it reads
//! the keys it needs through a [`TxContext`](ledgerbook_store::TxContext),
//! stages its writes, and commits them together when it succeeds.
//!
//! - [`Repository`]: exists / create / get / update / delete / list per record family
//! - [`recorder`]: appends a transaction to a user, indexes its hash and counts it
//!   against a bank
//! - [`resolver`]: finds the user owning a transaction hash
//! - [`bootstrap`]: seeds the fixed banks
//! - [`Contract`]: named operations with string arguments, as delivered by a transport
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ledgerbook_contract::Contract;
//! use ledgerbook_store::MemoryWorldState;
//!
//! let contract = Contract::new(Arc::new(MemoryWorldState::new()));
//! contract
//!     .submit("CreateUser", &["1".into(), "John Lee".into(), "john.lee@g.com".into()])
//!     .unwrap();
//!
//! let payload = contract.evaluate("UserExists", &["1".into()]).unwrap();
//! assert_eq!(payload, b"true");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod banks;
pub mod bootstrap;
pub mod contract;
pub mod files;
pub mod function;
pub mod recorder;
pub mod repository;
pub mod resolver;
pub mod users;

pub use contract::Contract;
pub use function::Function;
pub use recorder::RecordReceipt;
pub use repository::Repository;
