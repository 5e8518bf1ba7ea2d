//! Client error types.

/// Errors that can occur when using the ledgerbook client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The addressed record does not exist.
    #[error("the {entity} {id} does not exist")]
    NotFound {
        /// Record family.
        entity: String,
        /// Missing identifier.
        id: String,
    },

    /// A create targeted an id that is already taken.
    #[error("the {entity} {id} already exists")]
    AlreadyExists {
        /// Record family.
        entity: String,
        /// Taken identifier.
        id: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Whether the server reported the record as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
