//! Service-level behavior against a stub backend.

use std::sync::Arc;
use std::time::Duration;

use pd_auth::{AuthTokens, MemorySessionStore, Session, SessionStore};
use pd_client::{ApiClient, PollOutcome};
use pd_core::pagination::PageQuery;
use pd_core::{ClientConfig, Error};
use pd_models::transaction::{PaymentMethod, TransactionInitiateRequest, TransactionStatus};
use pd_models::user::LoginRequest;
use pd_services::{AuthService, PaymentsService};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, store: Arc<MemorySessionStore>) -> ApiClient {
    let config = ClientConfig {
        base_url: format!("{}/api", server.uri()),
        // keep watch tests fast
        poll_interval: Duration::from_millis(10),
        ..ClientConfig::default()
    };
    ApiClient::new(config, store).unwrap()
}

fn seeded_store() -> Arc<MemorySessionStore> {
    let store = Arc::new(MemorySessionStore::new());
    store
        .store(Session::new(AuthTokens::new("access-1", "refresh-1")))
        .unwrap();
    store
}

fn transaction_body(status: &str) -> serde_json::Value {
    json!({
        "id": 11,
        "reference_code": "DP5TG20VG1",
        "provider_reference": null,
        "amount": "1500.00",
        "payment_method": "MPESA",
        "status": status,
        "description": "",
        "phone_number": "254712345678",
        "email": null,
        "created_at": "2025-03-01T12:00:00Z",
        "updated_at": "2025-03-01T12:00:00Z",
        "completed_at": null,
        "failed_reason": null,
        "user": 3,
        "user_username": "jdoe",
        "user_first_name": "Jane",
        "user_last_name": "Doe"
    })
}

#[tokio::test]
async fn login_stores_tokens_and_seed_user() {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::new());

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"username": "jdoe", "password": "s3cret!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "refresh": "refresh-1",
            "access": "access-1",
            "role": "STAFF",
            "must_change_password": false,
            "first_name": "Jane"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, store.clone());
    let response = AuthService::new(&client)
        .login(&LoginRequest {
            username: "jdoe".into(),
            password: "s3cret!".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.first_name, "Jane");
    let session = store.load().unwrap();
    assert_eq!(session.tokens.access, "access-1");
    assert_eq!(session.tokens.refresh, "refresh-1");
    let seed = session.user.unwrap();
    assert_eq!(seed.username, "jdoe");
    assert_eq!(seed.first_name, "Jane");
}

#[tokio::test]
async fn logout_clears_all_session_state() {
    let server = MockServer::start().await;
    let store = seeded_store();

    let client = client(&server, store.clone());
    AuthService::new(&client).logout().unwrap();

    assert!(store.load().is_none());
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
}

#[tokio::test]
async fn invalid_payload_issues_no_request() {
    let server = MockServer::start().await;
    let store = seeded_store();

    // nothing mounted: any request would come back as a 404 API error, so a
    // Validation error proves the wire was never touched
    let client = client(&server, store);
    let request = TransactionInitiateRequest {
        amount: "1500.00".into(),
        payment_method: PaymentMethod::Mpesa,
        phone_number: None,
        email: None,
        description: None,
    };
    let result = PaymentsService::new(&client).initiate(&request).await;

    match result {
        Err(Error::Validation(errors)) => {
            assert!(!errors.is_empty());
        }
        other => panic!("expected validation error, got {:?}", other.is_ok()),
    }
}

#[tokio::test]
async fn initiate_parses_the_pending_transaction() {
    let server = MockServer::start().await;
    let store = seeded_store();

    Mock::given(method("POST"))
        .and(path("/api/payments/initiate/"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "transaction": transaction_body("PENDING"),
            "message": "Mpesa STK push initiated. Please check your phone.",
            "task_id": "0c2f"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, store);
    let request = TransactionInitiateRequest {
        amount: "1500.00".into(),
        payment_method: PaymentMethod::Mpesa,
        phone_number: Some("254712345678".into()),
        email: None,
        description: None,
    };
    let response = PaymentsService::new(&client).initiate(&request).await.unwrap();

    assert_eq!(response.transaction.status, TransactionStatus::Pending);
    assert_eq!(response.transaction.reference_code, "DP5TG20VG1");
}

#[tokio::test]
async fn list_follows_the_pagination_envelope() {
    let server = MockServer::start().await;
    let store = seeded_store();

    Mock::given(method("GET"))
        .and(path("/api/payments/list/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 41,
            "next": format!("{}/api/payments/list/?page=3", server.uri()),
            "previous": format!("{}/api/payments/list/?page=1", server.uri()),
            "results": [transaction_body("COMPLETED")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, store);
    let page = PaymentsService::new(&client)
        .list(&PageQuery::new().page(2))
        .await
        .unwrap();

    assert_eq!(page.count, 41);
    assert_eq!(page.results.len(), 1);
    assert!(!page.is_last());
    assert_eq!(page.next_page(), Some(3));
}

#[tokio::test]
async fn watch_stops_at_the_first_terminal_status() {
    let server = MockServer::start().await;
    let store = seeded_store();

    // two pending polls, then completed
    Mock::given(method("GET"))
        .and(path("/api/payments/status/DP5TG20VG1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_body("PENDING")))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/payments/status/DP5TG20VG1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_body("COMPLETED")))
        .mount(&server)
        .await;

    let client = client(&server, store);
    let cancel = CancellationToken::new();
    let outcome = PaymentsService::new(&client)
        .watch("DP5TG20VG1", &cancel)
        .await;

    let transaction = outcome.into_terminal().expect("terminal outcome");
    assert_eq!(transaction.status, TransactionStatus::Completed);
}

#[tokio::test]
async fn watch_is_cancelled_on_teardown() {
    let server = MockServer::start().await;
    let store = seeded_store();

    Mock::given(method("GET"))
        .and(path("/api/payments/status/DP5TG20VG1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_body("PENDING")))
        .mount(&server)
        .await;

    let client = client(&server, store);
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(35)).await;
        canceller.cancel();
    });

    let outcome = PaymentsService::new(&client)
        .watch("DP5TG20VG1", &cancel)
        .await;

    assert!(matches!(outcome, PollOutcome::Cancelled));
}
