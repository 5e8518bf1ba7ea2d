//! Liveness endpoint.

use axum::Json;
use ledgerbook_contract::Function;
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Number of operations `/v1/submit` and `/v1/evaluate` accept.
    pub operations: usize,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        operations: Function::ALL.len(),
    })
}
