//! Health endpoint integration tests.

mod common;

use axum::http::{HeaderName, HeaderValue};
use common::TestHarness;

#[tokio::test]
async fn health_check_returns_ok() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn health_check_returns_json() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "ledgerbook-service");
    assert_eq!(body["operations"], 17);
}

#[tokio::test]
async fn wildcard_cors_admits_any_origin() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://example.test"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn listed_cors_origin_is_echoed_and_others_are_not() {
    let harness = TestHarness::with_cors_origins(&["http://app.test", "not a header\n"]);

    let allowed = harness
        .server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://app.test"),
        )
        .await;
    assert_eq!(
        allowed.header("access-control-allow-origin"),
        "http://app.test"
    );

    let refused = harness
        .server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://other.test"),
        )
        .await;
    refused.assert_status_ok();
    assert!(refused
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
