//! Integration tests for registration and account updates.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, assert_unauthenticated};

#[tokio::test]
async fn test_register_returns_account_without_hash() {
    let app = TestApp::new().await;
    let account = app.register("alice", "pw123456").await;

    assert_eq!(account["id"], 1);
    assert_eq!(account["username"], "alice");
    assert!(account.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    app.register("alice", "pw123456").await;

    let response = app
        .request(
            "POST",
            "/api/users/register",
            Some(json!({ "username": "alice", "password": "other-pass" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_weak_password() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/users/register",
            Some(json!({ "username": "alice", "password": "abc" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_password_forces_new_login() {
    let app = TestApp::new().await;
    app.register("alice", "pw123456").await;
    let token = app.login("alice", "pw123456").await;

    let response = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({ "password": "brand-new-pass", "email": "alice@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "alice@example.com");

    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": "pw123456" })),
            None,
        )
        .await;
    assert_unauthenticated(&old);

    app.login("alice", "brand-new-pass").await;
}

#[tokio::test]
async fn test_update_requires_authentication() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({ "email": "x@example.com" })),
            None,
        )
        .await;
    assert_unauthenticated(&response);
}
