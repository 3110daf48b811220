//! Common test utilities for marketplace integration tests
//!
//! Every test gets its own uniquely named in-memory SQLite database holding
//! the fixture (9 users, 27 listings), so tests are isolated and need no
//! cleanup.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use marketplace::{
    create_app,
    db::init_pool,
    run_migrations, seed,
    security::{HashParams, PasswordHasher, TokenIssuer},
    state::AppState,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Password of every fixture user
pub const PASSWORD: &str = seed::SEED_PASSWORD;

/// Builds seeded application state over a fresh in-memory database
///
/// Argon2 runs with minimal costs so the nine fixture hashes stay cheap.
pub fn create_test_state() -> AppState {
    let database_url = format!("file:it_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = Arc::new(init_pool(&database_url).expect("Failed to create pool"));

    {
        let conn = &mut pool.get().expect("Failed to get connection");
        run_migrations(conn).expect("Failed to run migrations");
    }

    let hasher = PasswordHasher::new(HashParams {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build hasher");
    seed::reseed(&pool, &hasher).expect("Failed to seed");

    let tokens = TokenIssuer::new(b"integration-test-secret", chrono::Duration::hours(1));
    AppState::new(pool, hasher, tokens)
}

/// Creates a seeded test application
pub fn create_test_app() -> Router {
    create_app(create_test_state())
}

/// Sends a request and returns the status with the parsed JSON body
///
/// ### Arguments
///
/// * `app` - The test application (cloned, since `oneshot` consumes it)
/// * `method` - The HTTP method
/// * `uri` - The request path
/// * `token` - Sent verbatim as the `Authorization` header when given
/// * `body` - Sent as a JSON body when given
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// GET with a token
pub async fn get(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(token), None).await
}

/// Logs in as a fixture user and returns the token
pub async fn login(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "username": username, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().expect("token missing").to_string()
}

/// A complete listing payload
pub fn listing_payload() -> Value {
    serde_json::json!({
        "product_name": "Test Product",
        "product_category": "Test Category",
        "product_description": "Test Description",
        "product_quantity": 10,
        "product_price": 100,
        "country": "Kenya",
        "market_name": "Test Market"
    })
}
