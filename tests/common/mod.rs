// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use cleancity::config::Config;
use cleancity::middleware::auth::create_jwt;
use cleancity::models::Role;
use cleancity::routes::create_router;
use cleancity::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Password of every seeded account in tests.
#[allow(dead_code)]
pub const DEMO_PASSWORD: &str = "cleancity";

/// A tiny valid PNG data URL.
#[allow(dead_code)]
pub const PIXEL: &str = "data:image/png;base64,iVBORw0KGgo=";

/// Create a test app over the seeded in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).expect("Failed to build state"));
    (create_router(state.clone()), state)
}

/// Mint a session token the same way login does.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, Role::User, signing_key).expect("Failed to create JWT")
}

#[allow(dead_code)]
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    send_json("POST", uri, token, body)
}

#[allow(dead_code)]
pub fn send_json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Run one request and decode the JSON body (`Null` when empty).
#[allow(dead_code)]
pub async fn call(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, body)
}

/// Log in through the API and return the bearer token.
#[allow(dead_code)]
pub async fn login(app: &Router, email: &str) -> String {
    let (status, _, body) = call(
        app,
        post_json(
            "/auth/login",
            None,
            serde_json::json!({ "email": email, "password": DEMO_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}
