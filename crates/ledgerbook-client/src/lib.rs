//! Ledgerbook Client SDK.
//!
//! This crate provides a client library for talking to the ledgerbook service.
//!
//! # Example
//!
//! ```no_run
//! use ledgerbook_client::{LedgerClient, NewTransaction};
//!
//! # async fn example() -> Result<(), ledgerbook_client::ClientError> {
//! let client = LedgerClient::new("http://ledgerbook.ledger.svc:8080")?;
//!
//! client.create_user("1", "John Lee", "john.lee@g.com").await?;
//! let receipt = client
//!     .create_transaction(NewTransaction {
//!         user_id: "1".to_string(),
//!         hash: "0x1".to_string(),
//!         amount: "200".to_string(),
//!         currency: "USD".to_string(),
//!         date: "2022-04-14".to_string(),
//!         bank_id: "04231910".to_string(),
//!     })
//!     .await?;
//!
//! println!("Bank count: {:?}", receipt.bank_transaction_count);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, LedgerClient};
pub use error::ClientError;
pub use ledgerbook_core::{Bank, File, Transaction, User};
pub use types::*;
