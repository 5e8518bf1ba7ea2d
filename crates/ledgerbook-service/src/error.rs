//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use ledgerbook_core::{IdError, LedgerError};

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
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

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The world state could not be read or written.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "not_found",
                self.to_string(),
                Some(serde_json::json!({ "entity": entity, "id": id })),
            ),
            Self::AlreadyExists { entity, id } => (
                StatusCode::CONFLICT,
                "already_exists",
                self.to_string(),
                Some(serde_json::json!({ "entity": entity, "id": id })),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Unavailable(msg) => {
                tracing::warn!(error = %msg, "World state unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_unavailable",
                    msg.clone(),
                    None,
                )
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound { entity, id } => Self::NotFound {
                entity: entity.to_string(),
                id,
            },
            LedgerError::AlreadyExists { entity, id } => Self::AlreadyExists {
                entity: entity.to_string(),
                id,
            },
            LedgerError::InvalidId(_)
            | LedgerError::UnknownFunction(_)
            | LedgerError::ArgumentCount { .. } => Self::BadRequest(err.to_string()),
            LedgerError::StoreUnavailable(msg) => Self::Unavailable(msg),
            LedgerError::MalformedRecord { .. } | LedgerError::Serialization(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<IdError> for ApiError {
    fn from(err: IdError) -> Self {
        LedgerError::from(err).into()
    }
}
