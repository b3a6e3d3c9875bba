//! Shared helpers for API integration tests.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, header},
};
use bookshelf_api::{AppState, create_router};
use bookshelf_auth::JwtManager;
use bookshelf_db::Database;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build a router over a fresh in-memory database.
pub async fn test_app() -> Router {
    test_app_with_expiry(24).await
}

/// Build a router whose issued tokens expire after the given hours.
/// Negative hours issue already-expired tokens.
pub async fn test_app_with_expiry(token_expiry_hours: i64) -> Router {
    let db = Database::new_in_memory().await.expect("in-memory database");
    let jwt = Arc::new(JwtManager::new(TEST_SECRET, token_expiry_hours));
    create_router(AppState::new(db, jwt, None))
}

/// Register a user and log in, returning the `token=...` cookie pair.
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/register",
            &json!({"username": username, "password": password}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_success(), "registration failed");

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/login",
            &json!({"username": username, "password": password}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_success(), "login failed");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|h| h.to_str().ok())
        .expect("login must set a cookie");

    // Keep only the name=value pair, dropping the attributes
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Build a bodyless request carrying a cookie.
pub fn cookie_request(method: Method, uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
