/// Common test utilities for API tests
///
/// This module provides shared infrastructure for router tests:
/// - A private in-memory database per test, migrated
/// - The full router, driven with `tower::ServiceExt::oneshot`
/// - Helpers for JSON requests and session cookies

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use projectboard_api::app::{build_router, AppState};
use projectboard_api::config::Config;
use projectboard_shared::db::migrations::run_migrations;
use projectboard_shared::db::pool::{create_pool, DatabaseConfig};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

#[allow(dead_code)]
pub const PASSWORD: &str = "Correct-Horse-9";

/// Response as seen by a test
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` part of the session `Set-Cookie` header
    #[allow(dead_code)]
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookie()
            .and_then(|cookie| cookie.split(';').next().map(str::to_string))
    }

    /// Raw `Set-Cookie` header
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

/// Test context containing all necessary resources
pub struct TestContext {
    #[allow(dead_code)]
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        let db = create_pool(DatabaseConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), Config::default());
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends one request through the router
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    #[allow(dead_code)]
    pub async fn get(&self, uri: &str, cookie: &str) -> TestResponse {
        self.send(Method::GET, uri, Some(cookie), None).await
    }

    #[allow(dead_code)]
    pub async fn post(&self, uri: &str, cookie: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(cookie), Some(body)).await
    }

    #[allow(dead_code)]
    pub async fn patch(&self, uri: &str, cookie: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(cookie), Some(body)).await
    }

    #[allow(dead_code)]
    pub async fn delete(&self, uri: &str, cookie: &str) -> TestResponse {
        self.send(Method::DELETE, uri, Some(cookie), None).await
    }

    /// Signs up `username` and returns the session cookie to send back
    #[allow(dead_code)]
    pub async fn signup(&self, username: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/signup",
                None,
                Some(json!({ "username": username, "password": PASSWORD })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "signup failed: {}", response.body);

        response.session_cookie().expect("signup should set a cookie")
    }

    /// Creates a project and returns its ID
    #[allow(dead_code)]
    pub async fn create_project(&self, cookie: &str, title: &str) -> i64 {
        let response = self
            .post("/addProject/", cookie, json!({ "title": title, "status": "idea" }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "create failed: {}", response.body);

        response.body["id"].as_i64().expect("project id")
    }
}
