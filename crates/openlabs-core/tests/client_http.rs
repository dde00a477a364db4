//! Integration tests for the API client against a mock server.
//!
//! These verify the request/parse contract: credential injection on the
//! wire, success and error decoding, and the login capture path.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openlabs_core::auth::{extract_credentials, LoginResponse};
use openlabs_core::{ApiClient, Config, Error, Overrides};

fn config_for(server: &MockServer, token: &str, enc_key: &str) -> Config {
    Config {
        api_url: server.uri(),
        auth_token: token.into(),
        enc_key: enc_key.into(),
    }
}

#[derive(Debug, Deserialize)]
struct Item {
    id: i64,
}

#[tokio::test]
async fn parse_decodes_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/blueprints/ranges/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server, "", ""), &Overrides::default()).unwrap();
    let response = client.get("/api/v1/blueprints/ranges/7").await.unwrap();
    let item: Option<Item> = ApiClient::parse(response).await.unwrap();

    assert_eq!(item.unwrap().id, 7);
}

#[tokio::test]
async fn parse_surfaces_detail_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ranges/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server, "", ""), &Overrides::default()).unwrap();
    let response = client.get("/api/v1/ranges/99").await.unwrap();
    let err = ApiClient::parse::<Item>(response).await.unwrap_err();

    match &err {
        Error::Api { status, detail } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(detail.as_deref(), Some("not found"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn parse_accepts_empty_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server, "", ""), &Overrides::default()).unwrap();
    let response = client.post_empty("/api/v1/auth/logout").await.unwrap();
    let parsed: Option<Item> = ApiClient::parse(response).await.unwrap();

    assert!(parsed.is_none());
}

#[tokio::test]
async fn parse_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server, "", ""), &Overrides::default()).unwrap();
    let response = client.get("/api/v1/workspaces").await.unwrap();
    let err = ApiClient::parse::<Item>(response).await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn requests_carry_cookie_aliases_and_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer tok-123"))
        .and(header_regex("cookie", "access_token_cookie=tok-123"))
        .and(header_regex("cookie", "jwt=tok-123"))
        .and(header_regex("cookie", "auth_token=tok-123"))
        .and(header_regex("cookie", "enc_key=key-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Test User", "email": "test@example.com", "admin": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        ApiClient::new(&config_for(&server, "tok-123", "key-456"), &Overrides::default()).unwrap();
    let response = client.get("/api/v1/users/me").await.unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn stored_token_beats_override_on_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let overrides = Overrides {
        api_url: None,
        token: Some("override-token".into()),
        enc_key: None,
    };
    let client = ApiClient::new(&config_for(&server, "stored-token", ""), &overrides).unwrap();
    let response = client.get("/api/v1/users/me").await.unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn request_body_is_sent_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"email": "a@b.c", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server, "", ""), &Overrides::default()).unwrap();
    let body = json!({"email": "a@b.c", "password": "pw"});
    let response = client
        .send(Method::POST, "/api/v1/auth/login", Some(&body))
        .await
        .unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    // Port 1 is never listening.
    let config = Config {
        api_url: "http://127.0.0.1:1".into(),
        auth_token: String::new(),
        enc_key: String::new(),
    };
    let client = ApiClient::new(&config, &Overrides::default()).unwrap();

    let err = client.get("/api/v1/ranges").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn login_capture_feeds_the_extractor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "access_token_cookie=jwt-abc; Path=/; HttpOnly")
                .append_header("set-cookie", "enc_key=enc-xyz; Path=/; HttpOnly")
                .set_body_json(json!({"success": true})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server, "", ""), &Overrides::default()).unwrap();
    let body = json!({"email": "a@b.c", "password": "pw"});
    let response = client
        .send(Method::POST, "/api/v1/auth/login", Some(&body))
        .await
        .unwrap();

    let snapshot = LoginResponse::capture(response).await.unwrap();
    let status: Option<openlabs_core::models::LoginStatus> = snapshot.parse().unwrap();
    assert!(status.unwrap().success);

    let creds = extract_credentials(&snapshot);
    assert_eq!(creds.token.as_deref(), Some("jwt-abc"));
    assert_eq!(creds.enc_key.as_deref(), Some("enc-xyz"));
}
