//! Tests for the auth module

use super::*;
use crate::error::Error;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_token_exchange() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(query_param("expirationMinutes", "15"))
        .and(header("Authorization", "Bearer my-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("token-abc\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new("my-api-key", &mock_server.uri(), 15);
    assert_eq!(auth.token().await.unwrap(), "token-abc");
}

#[tokio::test]
async fn test_token_is_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("cached-token"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new("key", &mock_server.uri(), 60);
    assert_eq!(auth.token().await.unwrap(), "cached-token");
    assert_eq!(auth.token().await.unwrap(), "cached-token");
}

#[tokio::test]
async fn test_clear_cache_forces_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new("key", &mock_server.uri(), 60);
    auth.token().await.unwrap();
    auth.clear_cache().await;
    auth.token().await.unwrap();
}

#[tokio::test]
async fn test_token_exchange_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new("wrong", &mock_server.uri(), 60);
    let err = auth.token().await.unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_blank_api_key() {
    let auth = Authenticator::new("  ", "http://localhost:1", 60);
    assert!(matches!(auth.token().await.unwrap_err(), Error::Auth { .. }));
}

#[test]
fn test_auth_url() {
    let auth = Authenticator::new("key", "https://integrate.example.com/", 30);
    assert_eq!(
        auth.auth_url(),
        "https://integrate.example.com/auth?expirationMinutes=30"
    );
}
