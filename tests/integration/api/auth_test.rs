//! Authentication API integration tests
//!
//! Tests for signup, login and the current-user endpoint.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_error, assert_error_contains, signup, test_server, SITE_ADMIN};

#[tokio::test]
async fn test_signup_success() {
    let server = test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "Alice@Example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["is_admin"], false);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_username_and_email() {
    let server = test_server();
    signup(&server, "alice").await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "password123"
        }))
        .await;
    assert_error_contains(&response, StatusCode::CONFLICT, "Username");

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;
    assert_error_contains(&response, StatusCode::CONFLICT, "Email");
}

#[tokio::test]
async fn test_signup_validation() {
    let server = test_server();

    for body in [
        json!({"username": "al", "email": "al@example.com", "password": "password123"}),
        json!({"username": "alice", "email": "not-an-email", "password": "password123"}),
        json!({"username": "alice", "email": "alice@example.com", "password": "short"}),
    ] {
        let response = server.post("/api/auth/signup").json(&body).await;
        assert_error(&response, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_configured_site_admin() {
    let server = test_server();
    let root = signup(&server, SITE_ADMIN).await;
    assert!(root.profile.is_admin);
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let server = test_server();
    let alice = signup(&server, "alice").await;

    for identifier in ["alice", "alice@example.com"] {
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "username": identifier, "password": alice.password }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["user"]["username"], "alice");
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = test_server();
    signup(&server, "alice").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong-password" }))
        .await;
    let unknown_user = server
        .post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": "password123" }))
        .await;

    let first = assert_error(&wrong_password, StatusCode::UNAUTHORIZED);
    let second = assert_error(&unknown_user, StatusCode::UNAUTHORIZED);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let server = test_server();
    let alice = signup(&server, "alice").await;

    let response = server.get("/api/auth/me").await;
    assert_error(&response, StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/auth/me")
        .authorization_bearer("not.a.token")
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let server = test_server();
    let alice = signup(&server, "alice").await;

    let response = server
        .delete("/api/users/me")
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = test_server();
    let response = server.get("/api/nothing-here").await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let server = test_server();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["store"], "memory");
}
