//! Integration tests for the login, refresh, logout, and me flows.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, assert_unauthenticated};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    app.register("alice", "pw123456").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": "pw123456" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body["data"]["token"].is_string());
    assert!(response.body["data"]["expires_at"].is_string());
}

#[tokio::test]
async fn test_login_token_carries_principal() {
    let app = TestApp::new().await;
    app.register("alice", "pw123456").await;
    let token = app.login("alice", "pw123456").await;

    let principal = app.codec().verify(&token).unwrap();
    assert_eq!(principal.user_id.get(), 1);
    assert_eq!(principal.username, "alice");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("alice", "pw123456").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": "nope-nope" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody", "password": "pw123456" })),
            None,
        )
        .await;

    assert_unauthenticated(&wrong_password);
    assert_unauthenticated(&unknown_user);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_login_empty_fields_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "", "password": "" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_returns_principal() {
    let app = TestApp::new().await;
    app.register("alice", "pw123456").await;
    let token = app.login("alice", "pw123456").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user_id"], 1);
    assert_eq!(response.body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_refresh_issues_new_working_token() {
    let app = TestApp::new().await;
    app.register("alice", "pw123456").await;
    let token = app.login("alice", "pw123456").await;

    let response = app
        .request("POST", "/api/auth/refresh", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let refreshed = response.body["data"]["token"].as_str().unwrap();
    assert_ne!(refreshed, token);
    let me = app.request("GET", "/api/auth/me", None, Some(refreshed)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_requires_token() {
    let app = TestApp::new().await;
    let response = app.request("POST", "/api/auth/refresh", None, None).await;
    assert_unauthenticated(&response);
}

#[tokio::test]
async fn test_token_survives_logout_until_expiry() {
    let app = TestApp::new().await;
    app.register("alice", "pw123456").await;
    let token = app.login("alice", "pw123456").await;

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
}
