//! Shared harness: the full router over an in-memory SQLite database.

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use imf_gadgets::api::AppState;
use imf_gadgets::config::Config;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_config(test_config()).await
}

pub async fn spawn_app_with_config(config: Config) -> TestApp {
    let state = imf_gadgets::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = imf_gadgets::api::router(state.clone());
    TestApp { router, state }
}

impl TestApp {
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, HeaderMap, Bytes) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, bytes)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, bytes) = self
            .send_raw(method, uri, token, body.map(|b| b.to_string()))
            .await;
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut body = serde_json::json!({ "username": username, "password": password });
        if let Some(role) = role {
            body["role"] = Value::from(role);
        }
        self.send(Method::POST, "/api/auth/register", None, Some(body))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Registers the user and returns a session token for it.
    pub async fn token_for(&self, username: &str, role: &str) -> String {
        let (status, _) = self.register(username, "pw-123456", Some(role)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self.login(username, "pw-123456").await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for("admin", "admin").await
    }

    pub async fn agent_token(&self) -> String {
        self.token_for("agent", "agent").await
    }

    /// Creates a gadget as `token` and returns the stored record.
    pub async fn create_gadget(&self, token: &str, name: &str, description: Option<&str>) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/gadgets",
                Some(token),
                Some(serde_json::json!({ "name": name, "description": description })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }
}
