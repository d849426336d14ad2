//! Integration tests for token issuance and bearer authentication.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN_PASSWORD, ADMIN_USER, DISABLED_USER, TestApp};

#[tokio::test]
async fn test_token_from_form() {
    let app = TestApp::new().await;

    let response = app
        .form(
            "/token",
            &format!("username={ADMIN_USER}&password={ADMIN_PASSWORD}"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access_token"].is_string());
    assert_eq!(response.body["token_type"], "bearer");
    assert_eq!(response.body["expires_in"], 1800);
}

#[tokio::test]
async fn test_token_from_json() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/token",
            Some(json!({ "username": ADMIN_USER, "password": ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access_token"].is_string());
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = TestApp::new().await;

    let response = app
        .form("/token", &format!("username={ADMIN_USER}&password=wrong"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Incorrect username or password");
    assert!(response.headers.contains_key("www-authenticate"));
}

#[tokio::test]
async fn test_unknown_and_disabled_users_rejected() {
    let app = TestApp::new().await;

    let unknown = app.form("/token", "username=nobody&password=x").await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);

    let disabled = app
        .form(
            "/token",
            &format!("username={DISABLED_USER}&password=irrelevant"),
        )
        .await;
    assert_eq!(disabled.status, StatusCode::UNAUTHORIZED);
    assert_eq!(disabled.body["message"], unknown.body["message"]);
}

#[tokio::test]
async fn test_username_is_not_a_token() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/products", None, Some(ADMIN_USER))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Could not validate credentials");
}

#[tokio::test]
async fn test_public_endpoints() {
    let app = TestApp::new().await;

    let root = app.request("GET", "/", None, None).await;
    assert_eq!(root.status, StatusCode::OK);
    assert!(root.body["version"].is_string());

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");
    assert_eq!(health.body["backend"], "memory");
}

#[tokio::test]
async fn test_db_check_requires_token() {
    let app = TestApp::new().await;

    let anonymous = app.request("GET", "/api/test-db", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let token = app.admin_token().await;
    let checked = app.request("GET", "/api/test-db", None, Some(&token)).await;
    assert_eq!(checked.status, StatusCode::OK);
    assert!(checked.body["message"].is_string());
}
