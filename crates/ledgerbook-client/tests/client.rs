//! Client integration tests against a mock ledgerbook service.

use ledgerbook_client::{ClientError, LedgerClient, NewTransaction};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, LedgerClient) {
    let server = MockServer::start().await;
    let client = LedgerClient::new(&server.uri()).unwrap();
    (server, client)
}

// ============================================================================
// Invocations
// ============================================================================

#[tokio::test]
async fn create_user_submits_named_operation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/submit"))
        .and(body_json(json!({
            "function": "CreateUser",
            "args": ["1", "John Lee", "john.lee@g.com"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "name": "John Lee",
            "email": "john.lee@g.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client
        .create_user("1", "John Lee", "john.lee@g.com")
        .await
        .unwrap();

    assert_eq!(user.id.as_str(), "1");
    assert!(user.transactions.is_empty());
}

#[tokio::test]
async fn exists_checks_are_evaluated() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/evaluate"))
        .and(body_json(json!({ "function": "BankExists", "args": ["004"] })))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .mount(&server)
        .await;

    assert!(client.bank_exists("004").await.unwrap());
}

#[tokio::test]
async fn create_transaction_returns_receipt() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/submit"))
        .and(body_json(json!({
            "function": "CreateTransaction",
            "args": ["1", "0x1", "200", "USD", "2022-04-14", "04231910"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "1",
            "hash": "0x1",
            "bank_id": "04231910",
            "user_transaction_count": 1,
            "bank_transaction_count": null
        })))
        .mount(&server)
        .await;

    let receipt = client
        .create_transaction(NewTransaction {
            user_id: "1".into(),
            hash: "0x1".into(),
            amount: "200".into(),
            currency: "USD".into(),
            date: "2022-04-14".into(),
            bank_id: "04231910".into(),
        })
        .await
        .unwrap();

    assert_eq!(receipt.user_transaction_count, 1);
    assert_eq!(receipt.bank_transaction_count, None);
}

#[tokio::test]
async fn delete_user_accepts_empty_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/submit"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_user("1").await.unwrap();
}

// ============================================================================
// Record routes
// ============================================================================

#[tokio::test]
async fn get_bank_reads_record_route() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/banks/04231910"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "04231910",
            "name": "Cathay",
            "transaction_count": 3
        })))
        .mount(&server)
        .await;

    let bank = client.get_bank("04231910").await.unwrap();
    assert_eq!(bank.transaction_count, 3);
}

#[tokio::test]
async fn get_user_by_hash_reads_transaction_route() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/transactions/0x1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "name": "John Lee",
            "transactions": [
                { "hash": "0x1", "amount": "200", "currency": "USD", "date": "2022-04-14" }
            ]
        })))
        .mount(&server)
        .await;

    let user = client.get_user_by_transaction_hash("0x1").await.unwrap();
    assert_eq!(user.transactions.len(), 1);
    assert_eq!(user.transactions[0].amount, "200");
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn not_found_maps_to_typed_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": "not_found",
                "message": "the user ghost does not exist",
                "details": { "entity": "user", "id": "ghost" }
            }
        })))
        .mount(&server)
        .await;

    let err = client.get_user("ghost").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ClientError::NotFound { ref id, .. } if id == "ghost"));
}

#[tokio::test]
async fn already_exists_maps_to_typed_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/submit"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {
                "code": "already_exists",
                "message": "the file 1 already exists",
                "details": { "entity": "file", "id": "1" }
            }
        })))
        .mount(&server)
        .await;

    let err = client
        .create_file("1", "a.pdf", "1234", "2022/04/11 12:00:09")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::AlreadyExists { ref entity, .. } if entity == "file"));
}

#[tokio::test]
async fn other_errors_keep_code_and_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/submit"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": "bad_request",
                "message": "function Transfer not found in contract"
            }
        })))
        .mount(&server)
        .await;

    let err = client.submit("Transfer", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { ref code, status: 400, .. } if code == "bad_request"
    ));
}

#[tokio::test]
async fn non_json_error_is_unknown() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client.health().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { ref code, status: 502, .. } if code == "unknown"
    ));
}
