/// Common test utilities for API integration tests
///
/// Builds the real router over an in-memory user store, so these tests
/// need neither PostgreSQL nor network access.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Duration;
use serde_json::Value;
use tower::Service as _;
use userhub_api::app::{build_router, AppState};
use userhub_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use userhub_shared::auth::jwt::{create_token, Claims};
use userhub_shared::auth::middleware::Authorizer;
use userhub_shared::models::user::NewUser;
use userhub_shared::repository::{memory::InMemoryUserRepository, UserRepository};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing all necessary resources
pub struct TestContext {
    pub repo: Arc<InMemoryUserRepository>,
    pub app: axum::Router,
    pub config: Config,
    pub jwt_token: String,
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            run_migrations: false,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expires_minutes: 30,
        },
    }
}

impl TestContext {
    /// Creates a context whose store holds `count` active users with ids 1..=count
    pub async fn with_users(count: usize) -> Self {
        let repo = Arc::new(InMemoryUserRepository::new());
        for n in 1..=count {
            repo.create(NewUser {
                email: format!("user{}@example.com", n),
                password_hash: "test_hash".to_string(), // Not used in these tests
                full_name: Some(format!("User {}", n)),
                phone: Some(format!("100-{}", n)),
            })
            .await
            .expect("seed user");
        }

        let config = test_config();
        let claims = Claims::new(1, "user1@example.com", Duration::minutes(30));
        let jwt_token = create_token(&claims, TEST_SECRET).expect("create token");

        let state = AppState::new(repo.clone(), config.clone());
        let app = build_router(state);

        TestContext {
            repo,
            app,
            config,
            jwt_token,
        }
    }

    /// Rebuilds the router with a different request guard
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        let state = AppState::new(self.repo.clone(), self.config.clone()).with_authorizer(authorizer);
        self.app = build_router(state);
        self
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends a request with the test token
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let auth = self.auth_header();
        self.send_with_auth(method, uri, Some(&auth), body).await
    }

    /// Sends a request with an arbitrary (or no) `Authorization` header
    pub async fn send_with_auth(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = authorization {
            builder = builder.header("authorization", auth);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

/// Ids of the users in a list response, in order
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|u| u["id"].as_i64().expect("integer id"))
        .collect()
}
