//! Named-operation handlers.
//!
//! The request names an operation and carries its arguments as strings, the
//! same shape a ledger peer would deliver. The response body is the
//! operation's payload verbatim.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Invocation request.
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    /// Operation name, e.g. `CreateUser`.
    pub function: String,
    /// Positional string arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Run an operation and commit its writes.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InvokeRequest>,
) -> Result<Response, ApiError> {
    tracing::debug!(function = %req.function, args = req.args.len(), "Submit");
    let payload = state.contract.submit(&req.function, &req.args)?;
    Ok(payload_response(payload))
}

/// Run an operation without committing its writes.
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InvokeRequest>,
) -> Result<Response, ApiError> {
    tracing::debug!(function = %req.function, args = req.args.len(), "Evaluate");
    let payload = state.contract.evaluate(&req.function, &req.args)?;
    Ok(payload_response(payload))
}

fn payload_response(payload: Vec<u8>) -> Response {
    if payload.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    ([(header::CONTENT_TYPE, "application/json")], payload).into_response()
}
