//! Chat REST API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_error, signup, test_server, test_server_with, test_config};

#[tokio::test]
async fn test_send_and_read_history() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;

    for (from, to, content) in [(&alice, "bob", "hi bob"), (&bob, "alice", "hi alice")] {
        let response = server
            .post(&format!("/api/chats/{}", to))
            .authorization_bearer(&from.token)
            .json(&json!({ "content": content }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let history: serde_json::Value = server
        .get("/api/chats/bob")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(history["total_elements"], 2);
    assert_eq!(history["content"][0]["content"], "hi alice");
    assert_eq!(history["content"][0]["from"], "bob");
    assert_eq!(history["content"][1]["content"], "hi bob");
}

#[tokio::test]
async fn test_chat_list_latest_per_partner() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    signup(&server, "bob").await;
    signup(&server, "carol").await;

    for (to, content) in [("bob", "one"), ("carol", "two"), ("bob", "three")] {
        server
            .post(&format!("/api/chats/{}", to))
            .authorization_bearer(&alice.token)
            .json(&json!({ "content": content }))
            .await;
    }

    let chats: serde_json::Value = server
        .get("/api/chats")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(chats.as_array().map(Vec::len), Some(2));
    assert_eq!(chats[0]["partner"], "bob");
    assert_eq!(chats[0]["last_message"]["content"], "three");
    assert_eq!(chats[0]["online"], false);
    assert_eq!(chats[1]["partner"], "carol");
}

#[tokio::test]
async fn test_send_errors() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    signup(&server, "bob").await;

    let response = server
        .post("/api/chats/alice")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "me" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/chats/ghost")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "boo" }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let response = server
        .post("/api/chats/bob")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "   " }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/chats/bob")
        .json(&json!({ "content": "anonymous" }))
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_message_length_limit_from_config() {
    let mut config = test_config();
    config.chat.max_message_length = 10;
    let server = test_server_with(config);
    let alice = signup(&server, "alice").await;
    signup(&server, "bob").await;

    let response = server
        .post("/api/chats/bob")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "this is far too long" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}
