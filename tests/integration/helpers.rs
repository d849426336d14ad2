//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use catalog_api::{AppState, build_app};
use catalog_auth::{MemoryCredentialStore, PasswordHasher};
use catalog_core::config::{AppConfig, DatabaseBackend, UserSeed};
use catalog_database::CatalogRepositories;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const DISABLED_USER: &str = "former";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Repositories behind the router, for direct inspection
    pub repositories: CatalogRepositories,
}

/// Captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

fn seed(username: &str, password: &str, disabled: bool) -> UserSeed {
    UserSeed {
        username: username.to_string(),
        full_name: None,
        email: None,
        password_hash: None,
        password: Some(password.to_string()),
        is_admin: !disabled,
        disabled,
    }
}

impl TestApp {
    /// Create a new test application over a fresh in-memory catalog
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.auth.users = vec![
            seed(ADMIN_USER, ADMIN_PASSWORD, false),
            seed(DISABLED_USER, "irrelevant", true),
        ];
        config.validate().expect("test config should be valid");

        let repositories = CatalogRepositories::from_config(&config.database, true)
            .await
            .expect("Failed to build repositories");
        let credentials = MemoryCredentialStore::from_config(&config.auth, &PasswordHasher::new())
            .await
            .expect("Failed to seed credentials");

        let state = AppState::new(config, repositories.clone(), Arc::new(credentials));

        Self {
            router: build_app(state),
            repositories,
        }
    }

    /// Log in as the seeded administrator and return the access token
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USER, ADMIN_PASSWORD).await
    }

    /// Login through the form endpoint and return the JWT access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .form("/token", &format!("username={username}&password={password}"))
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string()
    }

    /// POST an url-encoded form
    pub async fn form(&self, path: &str, body: &str) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Create a product and return its body
    pub async fn create_product(&self, token: &str, body: Value) -> Value {
        let response = self.request("POST", "/api/products", Some(body), Some(token)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
