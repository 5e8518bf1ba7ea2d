//! Common test utilities for ledgerbook integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use ledgerbook_service::{create_router, AppState, ServiceConfig};
use ledgerbook_store::RocksWorldState;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// Shared state, for calling the contract directly.
    pub state: AppState,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        Self::with_cors_origins(&["*"])
    }

    /// Like [`TestHarness::new`], admitting only `origins` for CORS.
    pub fn with_cors_origins(origins: &[&str]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let world_state =
            RocksWorldState::open(temp_dir.path()).expect("Failed to open world state");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            cors_origins: origins.iter().map(|o| (*o).to_string()).collect(),
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            init_ledger_on_start: false,
        };

        let state = AppState::new(Arc::new(world_state), config);
        let router: Router = create_router(state.clone());

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
            state,
        }
    }

    /// Submit an operation and return the raw response.
    pub async fn submit(&self, function: &str, args: &[&str]) -> axum_test::TestResponse {
        self.server
            .post("/v1/submit")
            .json(&json!({ "function": function, "args": args }))
            .await
    }

    /// Evaluate an operation and return the raw response.
    pub async fn evaluate(&self, function: &str, args: &[&str]) -> axum_test::TestResponse {
        self.server
            .post("/v1/evaluate")
            .json(&json!({ "function": function, "args": args }))
            .await
    }

    /// Create user "1" and bank "04231910".
    pub async fn seed_john_and_cathay(&self) {
        self.submit("CreateUser", &["1", "John Lee", "john.lee@g.com"])
            .await
            .assert_status_ok();
        self.submit("CreateBank", &["04231910", "Cathay"])
            .await
            .assert_status_ok();
    }

    /// The `error.code` field of an error response.
    pub fn error_code(body: &Value) -> &str {
        body["error"]["code"].as_str().unwrap_or_default()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
