//! Refresh-and-retry behavior of the HTTP wrapper against a stub server.

use std::sync::Arc;

use pd_auth::{AuthTokens, MemorySessionStore, Session, SessionStore};
use pd_client::ApiClient;
use pd_core::{ClientConfig, Error};
use pd_models::{Contract, User};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn profile_body() -> serde_json::Value {
    json!({
        "id": 7,
        "username": "jdoe",
        "email": "jdoe@example.com",
        "first_name": "Jane",
        "last_name": "Doe",
        "phone_number": "254712345678",
        "role": "STAFF",
        "is_locked": false,
        "date_joined": "2025-01-15T08:30:00Z"
    })
}

fn seeded_store() -> Arc<MemorySessionStore> {
    let store = Arc::new(MemorySessionStore::new());
    store
        .store(Session::new(AuthTokens::new("stale", "refresh-1")))
        .unwrap();
    store
}

fn client(server: &MockServer, store: Arc<MemorySessionStore>) -> ApiClient {
    let config = ClientConfig {
        base_url: format!("{}/api", server.uri()),
        ..ClientConfig::default()
    };
    ApiClient::new(config, store).unwrap()
}

#[tokio::test]
async fn refreshes_once_and_retries_the_original_request() {
    let server = MockServer::start().await;
    let store = seeded_store();

    Mock::given(method("GET"))
        .and(path("/api/users/profile/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .and(body_json(json!({"refresh": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users/profile/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, store.clone());
    let user: User = client.get("users/profile/").await.unwrap();

    assert_eq!(user.username, "jdoe");
    // the refreshed access token was stored, the refresh token kept
    assert_eq!(store.access_token().as_deref(), Some("fresh"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn a_second_401_is_final_and_triggers_no_second_refresh() {
    let server = MockServer::start().await;
    let store = seeded_store();

    // rejects the original and the retried request alike
    Mock::given(method("GET"))
        .and(path("/api/users/profile/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Still not welcome"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, store.clone());
    let result: Result<User, _> = client.get("users/profile/").await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    // the session survives; only a failed refresh exchange clears it
    assert_eq!(store.access_token().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn missing_refresh_token_clears_the_session() {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::new());

    Mock::given(method("GET"))
        .and(path("/api/users/profile/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "No credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server, store.clone());
    let result: Result<User, _> = client.get("users/profile/").await;

    assert!(matches!(result, Err(Error::SessionExpired)));
    assert!(store.load().is_none());
}

#[tokio::test]
async fn refresh_failure_clears_the_session() {
    let server = MockServer::start().await;
    let store = seeded_store();

    Mock::given(method("GET"))
        .and(path("/api/users/profile/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Token is invalid or expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, store.clone());
    let result: Result<User, _> = client.get("users/profile/").await;

    assert!(matches!(result, Err(Error::SessionExpired)));
    assert!(store.load().is_none());
}

struct NoAuthorizationHeader;

impl Match for NoAuthorizationHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

#[tokio::test]
async fn public_endpoints_send_no_bearer_header() {
    let server = MockServer::start().await;
    // a session is held, but public endpoints must not use it
    let store = seeded_store();

    Mock::given(method("GET"))
        .and(path("/api/contracts/sign/tok-abc123/"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "reference_code": "CT7Q2M4X9A",
            "client_name": "Acme Ltd",
            "client_email": "ops@acme.example",
            "client_phone": "254712345678",
            "service_description": "Quarterly maintenance",
            "amount": "120000.00",
            "status": "VIEWED",
            "signed_at": null,
            "created_at": "2025-02-10T09:00:00Z",
            "updated_at": "2025-02-10T09:00:00Z",
            "expires_at": null,
            "created_by": 1,
            "created_by_username": "admin",
            "invoice_reference": null,
            "signing_token": "tok-abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, store);
    let contract: Contract = client
        .get_public("contracts/sign/tok-abc123/")
        .await
        .unwrap();
    assert_eq!(contract.signing_token, "tok-abc123");
}

#[tokio::test]
async fn non_401_errors_surface_the_body_message() {
    let server = MockServer::start().await;
    let store = seeded_store();

    Mock::given(method("GET"))
        .and(path("/api/payments/status/DPMISSING1/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Transaction not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, store);
    let result: Result<pd_models::Transaction, _> =
        client.get("payments/status/DPMISSING1/").await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Transaction not found");
        }
        other => panic!("expected Api error, got {:?}", other.map(|t| t.reference_code)),
    }
}
