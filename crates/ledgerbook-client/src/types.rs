//! Request and response types for the ledgerbook client.

use serde::{Deserialize, Serialize};

/// Named-operation request body.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeRequest<'a> {
    /// Operation name.
    pub function: &'a str,
    /// Positional string arguments.
    pub args: &'a [String],
}

/// Arguments of a `CreateTransaction` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Owning user.
    pub user_id: String,
    /// Transaction hash.
    pub hash: String,
    /// Amount, as supplied.
    pub amount: String,
    /// Currency code.
    pub currency: String,
    /// Date, as supplied.
    pub date: String,
    /// Bank to count the transaction against.
    pub bank_id: String,
}

impl NewTransaction {
    pub(crate) fn into_args(self) -> Vec<String> {
        vec![
            self.user_id,
            self.hash,
            self.amount,
            self.currency,
            self.date,
            self.bank_id,
        ]
    }
}

/// What recording a transaction changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionReceipt {
    /// User the transaction was appended to.
    pub user_id: String,
    /// Hash indexed to the user.
    pub hash: String,
    /// Bank named in the request.
    pub bank_id: String,
    /// The user's transaction count after the append.
    pub user_transaction_count: usize,
    /// The bank's new count, absent when the bank does not exist.
    pub bank_transaction_count: Option<u64>,
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Number of invocable operations.
    #[serde(default)]
    pub operations: usize,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}
