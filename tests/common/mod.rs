#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use schedule_api::config::AppConfig;
use schedule_api::database::MemoryStore;
use schedule_api::AppState;

pub const TEST_SECRET: &str = "test-secret";
pub const PASSWORD: &str = "secret1";

/// In-process app over a fresh in-memory store
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("response is not JSON ({e}): {}", self.text))
    }
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::development();
        config.security.jwt_secret = TEST_SECRET.to_string();
        config.security.bcrypt_cost = 4;
        config.api.enable_request_logging = false;

        let state = AppState::new(config, Arc::new(MemoryStore::new()));
        Self {
            router: schedule_api::app(state.clone()),
            state,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;

        Ok(TestResponse {
            status,
            headers,
            text: String::from_utf8(bytes.to_vec()).context("response body is not UTF-8")?,
        })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::DELETE, uri, token, None).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<TestResponse> {
        self.post(
            "/api/auth/register",
            None,
            json!({
                "firstName": "Test",
                "lastName": "User",
                "email": email,
                "password": password,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TestResponse> {
        self.post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Register `email` with the default password and return a fresh token
    pub async fn token_for(&self, email: &str) -> Result<String> {
        let res = self.register(email, PASSWORD).await?;
        anyhow::ensure!(res.status == StatusCode::OK, "register failed: {} {}", res.status, res.text);

        let res = self.login(email, PASSWORD).await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {} {}", res.status, res.text);

        res.json()["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    pub async fn add_item(&self, token: &str, body: Value) -> Result<Value> {
        let res = self.post("/api/schedule/add", Some(token), body).await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "add failed: {} {}", res.status, res.text);
        Ok(res.json())
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Value>> {
        let res = self.get("/api/schedule/list", Some(token)).await?;
        anyhow::ensure!(res.status == StatusCode::OK, "list failed: {} {}", res.status, res.text);
        Ok(res.json().as_array().cloned().unwrap_or_default())
    }
}

pub fn item(title: &str, start: &str, end: &str, priority: &str) -> Value {
    json!({
        "title": title,
        "type": "Work",
        "location": "Room 1",
        "description": format!("{title} description"),
        "startTime": start,
        "endTime": end,
        "priority": priority,
    })
}
