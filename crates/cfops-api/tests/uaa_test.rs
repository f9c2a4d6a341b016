// Integration tests for `UaaTokenProvider` using wiremock.
#![allow(clippy::unwrap_used)]

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cfops_api::{Error, TokenProvider, UaaTokenProvider};

fn provider(server: &MockServer) -> UaaTokenProvider {
    UaaTokenProvider::with_client(
        &Url::parse(&server.uri()).unwrap(),
        reqwest::Client::new(),
        "admin".into(),
        SecretString::from("s3cret"),
    )
    .unwrap()
}

#[tokio::test]
async fn test_password_grant_is_cached() {
    let server = MockServer::start().await;

    // "cf:" base64-encoded: default client with an empty secret.
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("authorization", "Basic Y2Y6"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc.def",
            "token_type": "bearer",
            "expires_in": 599
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uaa = provider(&server);
    let first = uaa.token().await.unwrap();
    let second = uaa.token().await.unwrap();

    assert_eq!(first.expose_secret(), "abc.def");
    assert_eq!(second.expose_secret(), "abc.def");
}

#[tokio::test]
async fn test_rejected_credentials_surface_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "unauthorized",
            "error_description": "Bad credentials"
        })))
        .mount(&server)
        .await;

    let err = provider(&server).token().await.unwrap_err();

    match err {
        Error::Authentication { message } => assert_eq!(message, "Bad credentials"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_grant_is_retried_on_next_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "later",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    let uaa = provider(&server);
    assert!(uaa.token().await.is_err());
    assert_eq!(uaa.token().await.unwrap().expose_secret(), "later");
}
