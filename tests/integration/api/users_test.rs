//! User API integration tests
//!
//! Profiles, follows, the feed and account management.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    assert_error, assert_error_contains, create_community, create_post, join, signup, test_server,
    SITE_ADMIN,
};

#[tokio::test]
async fn test_profile_hides_email_from_others() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;

    let own: serde_json::Value = server
        .get("/api/users/alice")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(own["email"], "alice@example.com");

    let other: serde_json::Value = server
        .get("/api/users/alice")
        .authorization_bearer(&bob.token)
        .await
        .json();
    assert!(other.get("email").is_none());

    let anonymous: serde_json::Value = server.get("/api/users/alice").await.json();
    assert!(anonymous.get("email").is_none());
    assert_eq!(anonymous["username"], "alice");
}

#[tokio::test]
async fn test_unknown_user_is_404() {
    let server = test_server();
    let response = server.get("/api/users/ghost").await;
    assert_error_contains(&response, StatusCode::NOT_FOUND, "ghost");
}

#[tokio::test]
async fn test_update_bio() {
    let server = test_server();
    let alice = signup(&server, "alice").await;

    let response = server
        .patch("/api/users/me")
        .authorization_bearer(&alice.token)
        .json(&json!({ "bio": "  Rustacean  " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["bio"], "Rustacean");

    let response = server
        .patch("/api/users/me")
        .authorization_bearer(&alice.token)
        .json(&json!({ "bio": "b".repeat(501) }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_is_paged() {
    let server = test_server();
    for name in ["carol", "alice", "bob"] {
        signup(&server, name).await;
    }

    let page: serde_json::Value = server
        .get("/api/users")
        .add_query_param("page", 0)
        .add_query_param("size", 2)
        .await
        .json();
    assert_eq!(page["total_elements"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["content"][0]["username"], "alice");
    assert_eq!(page["content"][1]["username"], "bob");

    let page: serde_json::Value = server
        .get("/api/users")
        .add_query_param("page", 1)
        .add_query_param("size", 2)
        .await
        .json();
    assert_eq!(page["content"].as_array().map(Vec::len), Some(1));
    assert_eq!(page["content"][0]["username"], "carol");
}

#[tokio::test]
async fn test_follow_and_unfollow() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    signup(&server, "bob").await;

    for _ in 0..2 {
        let response = server
            .post("/api/users/bob/follow")
            .authorization_bearer(&alice.token)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["username"], "bob");
        assert_eq!(body["follower_count"], 1);
        assert_eq!(body["followed_by_me"], true);
    }

    let followers: serde_json::Value = server.get("/api/users/bob/followers").await.json();
    assert_eq!(followers["content"][0]["username"], "alice");
    let following: serde_json::Value = server.get("/api/users/alice/following").await.json();
    assert_eq!(following["content"][0]["username"], "bob");

    let response = server
        .delete("/api/users/bob/follow")
        .authorization_bearer(&alice.token)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["follower_count"], 0);
    assert_eq!(body["followed_by_me"], false);
}

#[tokio::test]
async fn test_profile_reports_follow_state_to_viewer() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;

    let before: serde_json::Value = server
        .get("/api/users/bob")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(before["followed_by_me"], false);

    server
        .post("/api/users/bob/follow")
        .authorization_bearer(&alice.token)
        .await;

    let after: serde_json::Value = server
        .get("/api/users/bob")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(after["followed_by_me"], true);

    let own: serde_json::Value = server
        .get("/api/users/bob")
        .authorization_bearer(&bob.token)
        .await
        .json();
    assert!(own.get("followed_by_me").is_none());

    let anonymous: serde_json::Value = server.get("/api/users/bob").await.json();
    assert!(anonymous.get("followed_by_me").is_none());
}

#[tokio::test]
async fn test_list_user_communities() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    create_community(&server, &alice, "zig").await;
    create_community(&server, &alice, "rust").await;
    create_community(&server, &alice, "go").await;
    join(&server, &bob, "zig").await;
    join(&server, &bob, "rust").await;

    let response = server.get("/api/users/bob/communities").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let names: Vec<&str> = body
        .as_array()
        .map(|items| items.iter().filter_map(|c| c["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["rust", "zig"]);

    let response = server.get("/api/users/ghost/communities").await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_follow_self() {
    let server = test_server();
    let alice = signup(&server, "alice").await;

    let response = server
        .post("/api/users/alice/follow")
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_feed_shows_followed_authors_and_joined_communities() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;
    let carol = signup(&server, "carol").await;

    create_community(&server, &bob, "rust").await;
    create_community(&server, &carol, "golang").await;
    create_community(&server, &carol, "cooking").await;

    let from_bob = create_post(&server, &bob, "rust", "Followed author").await;
    let from_carol = create_post(&server, &carol, "golang", "Joined community").await;
    create_post(&server, &carol, "cooking", "Not visible").await;

    server
        .post("/api/users/bob/follow")
        .authorization_bearer(&alice.token)
        .await;
    join(&server, &alice, "golang").await;

    let feed: serde_json::Value = server
        .get("/api/feed")
        .authorization_bearer(&alice.token)
        .await
        .json();
    let ids: Vec<&str> = feed["content"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|post| post["id"].as_str())
        .collect();
    assert_eq!(ids, vec![from_carol.as_str(), from_bob.as_str()]);
}

#[tokio::test]
async fn test_user_posts_listing() {
    let server = test_server();
    let alice = signup(&server, "alice").await;
    create_community(&server, &alice, "rust").await;
    create_post(&server, &alice, "rust", "First").await;
    create_post(&server, &alice, "rust", "Second").await;

    let posts: serde_json::Value = server.get("/api/users/alice/posts").await.json();
    assert_eq!(posts["total_elements"], 2);
    assert_eq!(posts["content"][0]["title"], "Second");
}

#[tokio::test]
async fn test_only_self_or_site_admin_can_delete_account() {
    let server = test_server();
    let root = signup(&server, SITE_ADMIN).await;
    let alice = signup(&server, "alice").await;
    signup(&server, "bob").await;

    let response = server
        .delete("/api/users/bob")
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = server
        .delete("/api/users/bob")
        .authorization_bearer(&root.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get("/api/users/bob").await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_admin() {
    let server = test_server();
    let root = signup(&server, SITE_ADMIN).await;
    let alice = signup(&server, "alice").await;

    let response = server
        .put("/api/users/alice/admin")
        .authorization_bearer(&alice.token)
        .json(&json!({ "is_admin": true }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = server
        .put("/api/users/alice/admin")
        .authorization_bearer(&root.token)
        .json(&json!({ "is_admin": true }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["is_admin"], true);

    let response = server
        .put(&format!("/api/users/{}/admin", SITE_ADMIN))
        .authorization_bearer(&root.token)
        .json(&json!({ "is_admin": false }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}
