//! Post and reply API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    assert_error, assert_error_contains, create_community, create_post, join, signup, test_server,
};

#[tokio::test]
async fn test_members_post_outsiders_cannot() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    create_community(&server, &alice, "rust").await;

    let response = server
        .post("/api/communities/rust/posts")
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "Hi", "body": "Let me in" }))
        .await;
    assert_error_contains(&response, StatusCode::FORBIDDEN, "Join");

    join(&server, &bob, "rust").await;
    let response = server
        .post("/api/communities/rust/posts")
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "  Hi  ", "body": "Now I'm in" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let post: serde_json::Value = response.json();
    assert_eq!(post["title"], "Hi");
    assert_eq!(post["author"], "bob");
    assert_eq!(post["community"], "rust");
    assert_eq!(post["reply_count"], 0);
}

#[tokio::test]
async fn test_post_validation() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    create_community(&server, &alice, "rust").await;

    let response = server
        .post("/api/communities/rust/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "   ", "body": "body" }))
        .await;
    assert_error_contains(&response, StatusCode::BAD_REQUEST, "Title");

    let response = server
        .post("/api/communities/rust/posts")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "title", "body": "" }))
        .await;
    assert_error_contains(&response, StatusCode::BAD_REQUEST, "Body");
}

#[tokio::test]
async fn test_community_posts_newest_first() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    create_community(&server, &alice, "rust").await;
    create_post(&server, &alice, "rust", "One").await;
    create_post(&server, &alice, "rust", "Two").await;
    create_post(&server, &alice, "rust", "Three").await;

    let page: serde_json::Value = server
        .get("/api/communities/rust/posts")
        .add_query_param("size", 2)
        .await
        .json();
    assert_eq!(page["total_elements"], 3);
    assert_eq!(page["content"][0]["title"], "Three");
    assert_eq!(page["content"][1]["title"], "Two");
}

#[tokio::test]
async fn test_only_author_edits() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    create_community(&server, &alice, "rust").await;
    let id = create_post(&server, &alice, "rust", "Original").await;

    let response = server
        .patch(&format!("/api/posts/{}", id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "Defaced" }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = server
        .patch(&format!("/api/posts/{}", id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "Edited" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let post: serde_json::Value = response.json();
    assert_eq!(post["title"], "Edited");
    assert_eq!(post["body"], "Body of Original");

    let response = server
        .patch(&format!("/api/posts/{}", id))
        .authorization_bearer(&alice.token)
        .json(&json!({}))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_moderator_deletes_others_posts() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    let carol = signup(&server, "carol").await;
    create_community(&server, &alice, "rust").await;
    join(&server, &bob, "rust").await;
    join(&server, &carol, "rust").await;
    server
        .put("/api/communities/rust/moderators/bob")
        .authorization_bearer(&alice.token)
        .await;

    let first = create_post(&server, &carol, "rust", "First").await;
    let second = create_post(&server, &alice, "rust", "Second").await;

    // A plain member cannot delete someone else's post
    let response = server
        .delete(&format!("/api/posts/{}", second))
        .authorization_bearer(&carol.token)
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = server
        .delete(&format!("/api/posts/{}", first))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .delete(&format!("/api/posts/{}", second))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_unknown_post() {
    let server = test_server();
    let response = server
        .get("/api/posts/00000000-0000-0000-0000-000000000000")
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replies_thread() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    create_community(&server, &alice, "rust").await;
    let post_id = create_post(&server, &alice, "rust", "Question").await;

    // Non-members may reply
    for body in ["First answer", "Second answer"] {
        let response = server
            .post(&format!("/api/posts/{}/replies", post_id))
            .authorization_bearer(&bob.token)
            .json(&json!({ "body": body }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let replies: serde_json::Value = server
        .get(&format!("/api/posts/{}/replies", post_id))
        .await
        .json();
    assert_eq!(replies["total_elements"], 2);
    assert_eq!(replies["content"][0]["body"], "First answer");
    assert_eq!(replies["content"][1]["author"], "bob");

    let post: serde_json::Value = server.get(&format!("/api/posts/{}", post_id)).await.json();
    assert_eq!(post["reply_count"], 2);
}

#[tokio::test]
async fn test_reply_edit_and_delete() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    create_community(&server, &alice, "rust").await;
    let post_id = create_post(&server, &alice, "rust", "Question").await;

    let reply: serde_json::Value = server
        .post(&format!("/api/posts/{}/replies", post_id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "body": "typo" }))
        .await
        .json();
    let reply_id = reply["id"].as_str().unwrap().to_string();

    let response = server
        .patch(&format!("/api/replies/{}", reply_id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "body": "not yours" }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = server
        .patch(&format!("/api/replies/{}", reply_id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "body": "fixed" }))
        .await;
    let updated: serde_json::Value = response.json();
    assert_eq!(updated["body"], "fixed");

    // The community admin moderates replies too
    let response = server
        .delete(&format!("/api/replies/{}", reply_id))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .delete(&format!("/api/replies/{}", reply_id))
        .authorization_bearer(&bob.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_banned_user_cannot_reply() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let troll = signup(&server, "troll").await;
    create_community(&server, &alice, "rust").await;
    let post_id = create_post(&server, &alice, "rust", "Question").await;

    server
        .post("/api/communities/rust/bans")
        .authorization_bearer(&alice.token)
        .json(&json!({ "username": "troll" }))
        .await;

    let response = server
        .post(&format!("/api/posts/{}/replies", post_id))
        .authorization_bearer(&troll.token)
        .json(&json!({ "body": "spam" }))
        .await;
    assert_error_contains(&response, StatusCode::FORBIDDEN, "banned");
}
