// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use meechain_onboarding::config::Config;
use meechain_onboarding::db::MemoryStore;
use meechain_onboarding::routes::create_router;
use meechain_onboarding::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app over a freshly seeded store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default(), MemoryStore::seeded()));
    (create_router(state.clone()), state)
}

/// Send a request, optionally with a bearer token and JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// Send a request and decode the JSON response.
#[allow(dead_code)]
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send(app, method, uri, token, body).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Sign in with a mock social identity. Returns `(user_id, token)`.
#[allow(dead_code)]
pub async fn login(app: &Router, social_id: &str) -> (String, String) {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/social",
        None,
        Some(json!({
            "provider": "Google",
            "socialId": social_id,
            "email": "user@google.com",
            "firstName": "ผู้ใช้",
            "lastName": "ทดสอบ",
            "profileImageUrl": "https://via.placeholder.com/150?text=Google"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    (
        body["user"]["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}
