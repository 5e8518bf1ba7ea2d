//! Ledgerbook HTTP API Service.
//!
//! This crate delivers invocations to the ledgerbook contract over HTTP:
//!
//! - Named operations with string arguments (`/v1/submit`, `/v1/evaluate`)
//! - Read routes for users, banks, files and hash lookups
//! - Health check

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
