//! WebSocket session tests
//!
//! These need a real socket, so the server uses the HTTP transport.

use axum::http::StatusCode;
use axum_test::{TestServer, TestWebSocket};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{auth_header, http_test_server, signup, TestUser};

/// Open a session and consume the welcome frame
async fn connect(server: &TestServer, user: &TestUser) -> TestWebSocket {
    let mut socket = server
        .get_websocket("/ws/chat")
        .add_query_param("token", &user.token)
        .await
        .into_websocket()
        .await;

    let welcome: Value = socket.receive_json().await;
    assert_eq!(welcome, json!({ "type": "welcome", "username": user.username }));
    socket
}

#[tokio::test]
async fn test_handshake_requires_token() {
    let server = http_test_server();

    let response = server.get_websocket("/ws/chat").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get_websocket("/ws/chat")
        .add_query_param("token", "garbage")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authorization_header_is_accepted() {
    let server = http_test_server();
    let alice = signup(&server, "alice").await;

    let mut socket = server
        .get_websocket("/ws/chat")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_str(&auth_header(&alice.token)).unwrap(),
        )
        .await
        .into_websocket()
        .await;

    let welcome: Value = socket.receive_json().await;
    assert_eq!(welcome["type"], "welcome");
}

#[tokio::test]
async fn test_ping_pong() {
    let server = http_test_server();
    let alice = signup(&server, "alice").await;
    let mut socket = connect(&server, &alice).await;

    socket.send_json(&json!({ "type": "ping" })).await;
    let pong: Value = socket.receive_json().await;
    assert_eq!(pong, json!({ "type": "pong" }));
}

#[tokio::test]
async fn test_message_delivered_to_recipient_and_echoed() {
    let server = http_test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    let mut alice_socket = connect(&server, &alice).await;
    let mut bob_socket = connect(&server, &bob).await;

    alice_socket
        .send_json(&json!({ "type": "send", "to": "bob", "content": "hello over ws" }))
        .await;

    let received: Value = bob_socket.receive_json().await;
    assert_eq!(received["type"], "message");
    assert_eq!(received["from"], "alice");
    assert_eq!(received["to"], "bob");
    assert_eq!(received["content"], "hello over ws");

    let echoed: Value = alice_socket.receive_json().await;
    assert_eq!(echoed["id"], received["id"]);

    // Stored as well
    let history: Value = server
        .get("/api/chats/alice")
        .authorization_bearer(&bob.token)
        .await
        .json();
    assert_eq!(history["content"][0]["content"], "hello over ws");
}

#[tokio::test]
async fn test_rest_message_reaches_open_session() {
    let server = http_test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    let mut bob_socket = connect(&server, &bob).await;

    let response = server
        .post("/api/chats/bob")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "sent over REST" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let received: Value = bob_socket.receive_json().await;
    assert_eq!(received["content"], "sent over REST");

    let chats: Value = server
        .get("/api/chats")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(chats[0]["partner"], "bob");
    assert_eq!(chats[0]["online"], true);
}

#[tokio::test]
async fn test_errors_only_reach_the_offending_session() {
    let server = http_test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    let mut alice_socket = connect(&server, &alice).await;
    let mut bob_socket = connect(&server, &bob).await;

    alice_socket.send_text("not json").await;
    let error: Value = alice_socket.receive_json().await;
    assert_eq!(error["type"], "error");

    alice_socket
        .send_json(&json!({ "type": "send", "to": "ghost", "content": "anyone?" }))
        .await;
    let error: Value = alice_socket.receive_json().await;
    assert_eq!(error["type"], "error");
    assert!(error["message"].as_str().unwrap().contains("ghost"));

    // Bob saw none of that; his next frame is the answer to his own ping
    bob_socket.send_json(&json!({ "type": "ping" })).await;
    let next: Value = bob_socket.receive_json().await;
    assert_eq!(next, json!({ "type": "pong" }));
}

#[tokio::test]
async fn test_every_session_of_a_user_receives_messages() {
    let server = http_test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    let mut laptop = connect(&server, &bob).await;
    let mut phone = connect(&server, &bob).await;

    server
        .post("/api/chats/bob")
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "both devices" }))
        .await;

    let first: Value = laptop.receive_json().await;
    let second: Value = phone.receive_json().await;
    assert_eq!(first["content"], "both devices");
    assert_eq!(first, second);
}
