//! Application and authentication test helpers
//!
//! `test_server` builds the real router on a fresh `MemoryStore`;
//! `signup` registers a user through the API and keeps the token.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use townsquare::backend::server::{create_app_with_store, ServerConfig};
use townsquare::backend::store::{ForumStore, MemoryStore};
use townsquare::shared::forum::UserProfile;

/// Username granted site admin rights by [`test_config`]
pub const SITE_ADMIN: &str = "root";

/// Test user credentials
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
    pub profile: UserProfile,
}

/// Configuration with a cheap bcrypt cost and a fixed site admin
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.bcrypt_cost = 4;
    config.auth.site_admins = vec![SITE_ADMIN.to_string()];
    config.pagination.default_size = 10;
    config.pagination.max_size = 50;
    config
}

fn build_router(config: ServerConfig) -> axum::Router {
    let store: Arc<dyn ForumStore> = Arc::new(MemoryStore::new());
    create_app_with_store(config, store).expect("test config is valid")
}

/// In-process server on a fresh in-memory store
pub fn test_server() -> TestServer {
    TestServer::new(build_router(test_config())).expect("Failed to create test server")
}

/// Same as [`test_server`] with a custom configuration
pub fn test_server_with(config: ServerConfig) -> TestServer {
    TestServer::new(build_router(config)).expect("Failed to create test server")
}

/// Server bound to a real port, required for WebSocket tests
pub fn http_test_server() -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(build_router(test_config()))
        .expect("Failed to create HTTP test server")
}

/// Register `username` through the API
pub async fn signup(server: &TestServer, username: &str) -> TestUser {
    let email = format!("{}@example.com", username);
    let password = "password123".to_string();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .await;
    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "signup of {} failed: {}",
        username,
        response.text()
    );

    let body: serde_json::Value = response.json();
    TestUser {
        username: username.to_string(),
        email,
        password,
        token: body["token"].as_str().expect("token in signup response").to_string(),
        profile: serde_json::from_value(body["user"].clone()).expect("user in signup response"),
    }
}

/// Create a community owned by `owner`
pub async fn create_community(server: &TestServer, owner: &TestUser, name: &str) {
    let response = server
        .post("/api/communities")
        .authorization_bearer(&owner.token)
        .json(&json!({ "name": name, "description": format!("All about {}", name) }))
        .await;
    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "creating {} failed: {}",
        name,
        response.text()
    );
}

pub async fn join(server: &TestServer, user: &TestUser, community: &str) {
    let response = server
        .post(&format!("/api/communities/{}/join", community))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
}

/// Create a post and return its id
pub async fn create_post(server: &TestServer, author: &TestUser, community: &str, title: &str) -> String {
    let response = server
        .post(&format!("/api/communities/{}/posts", community))
        .authorization_bearer(&author.token)
        .json(&json!({ "title": title, "body": format!("Body of {}", title) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    let body: serde_json::Value = response.json();
    body["id"].as_str().expect("post id").to_string()
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
