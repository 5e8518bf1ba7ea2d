//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, invoke, records};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Invocations
/// - `POST /v1/submit` - Run a named operation and commit its writes
/// - `POST /v1/evaluate` - Run a named operation without committing
///
/// ## Records
/// - `GET /v1/users` - List users
/// - `GET /v1/users/:id` - Get a user
/// - `GET /v1/banks` - List banks
/// - `GET /v1/banks/:id` - Get a bank
/// - `GET /v1/files` - List files
/// - `GET /v1/files/:id` - Get a file
/// - `GET /v1/transactions/:hash/user` - Get the user owning a transaction
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = RequestBodyLimitLayer::new(state.config.max_body_bytes);
    let timeout = TimeoutLayer::new(Duration::from_secs(state.config.request_timeout_seconds));

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", invocation_routes().merge(record_routes()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(body_limit)
        .layer(timeout)
        .with_state(Arc::new(state))
}

fn invocation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/submit", post(invoke::submit))
        .route("/evaluate", post(invoke::evaluate))
}

fn record_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(records::list_users))
        .route("/users/:id", get(records::get_user))
        .route("/banks", get(records::list_banks))
        .route("/banks/:id", get(records::get_bank))
        .route("/files", get(records::list_files))
        .route("/files/:id", get(records::get_file))
        .route(
            "/transactions/:hash/user",
            get(records::get_user_by_transaction_hash),
        )
}

/// CORS for the configured origins. `*` admits any origin; unparseable
/// entries are skipped with a warning.
///
/// Only the methods and headers the API uses are allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed = origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| tracing::warn!(%origin, "Ignoring invalid CORS origin"))
                .ok()
        });
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
