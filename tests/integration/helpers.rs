//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use gatekeeper_auth::TokenCodec;
use gatekeeper_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

/// Status and decoded JSON body of a test response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.secret_key = "integration-test-secret".to_string();
    config.auth.password_min_length = 6;
    config.cache.provider = "memory".to_string();
    config
}

impl TestApp {
    /// Create a new test application with in-memory cache and accounts
    pub async fn new() -> Self {
        let config = test_config();
        let state = gatekeeper_api::build_state(config.clone())
            .await
            .expect("Failed to build app state");
        Self {
            router: gatekeeper_api::build_app(state),
            config,
        }
    }

    /// A codec sharing the server's key and issuer
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(&self.config.auth).expect("Failed to build codec")
    }

    /// Send a request with an optional JSON body and bearer token
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {t}"));
        self.request_raw(method, uri, body, authorization.as_deref())
            .await
    }

    /// Send a request with a verbatim `Authorization` header value
    pub async fn request_raw(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Register an account and assert it was created
    pub async fn register(&self, username: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/users/register",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"].clone()
    }

    /// Log in and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["data"]["token"]
            .as_str()
            .expect("token missing")
            .to_string()
    }
}

/// Assert the uniform authentication failure response
pub fn assert_unauthenticated(response: &TestResponse) {
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
    assert_eq!(response.body["message"], "Unauthenticated");
}
