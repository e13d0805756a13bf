//! PostgreSQL store integration tests
//!
//! Run with `cargo test -- --ignored` and `DATABASE_URL` set.

use chrono::{Duration, Utc};
use serial_test::serial;
use townsquare::backend::store::{
    BanRepo, ChatRepo, CommunityRepo, FollowRepo, NewBan, NewChatMessage, NewCommunity, NewPost,
    NewReply, NewUser, PostRepo, ReplyRepo, StoreError, User, UserRepo,
};
use townsquare::shared::PageParams;

use crate::common::test_pg_store;

async fn user(store: &impl UserRepo, name: &str) -> User {
    store
        .create_user(NewUser {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            password_hash: "hash".to_string(),
            is_admin: false,
        })
        .await
        .expect("create user")
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
#[serial]
async fn test_unique_constraints_map_to_conflict() {
    let store = test_pg_store().await;
    user(&store, "alice").await;

    let err = store
        .create_user(NewUser {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "hash".to_string(),
            is_admin: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(field) if field == "username"));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
#[serial]
async fn test_community_membership_and_bans() {
    let store = test_pg_store().await;
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;

    let community = store
        .create_community(NewCommunity {
            name: "rust".to_string(),
            description: String::new(),
            admin_id: alice.id,
        })
        .await
        .unwrap();
    assert_eq!(community.member_count, 1);
    assert_eq!(community.admin_username, "alice");

    assert!(store.add_member(community.id, bob.id).await.unwrap());
    assert!(!store.add_member(community.id, bob.id).await.unwrap());
    let joined = store.communities_for_user(bob.id).await.unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].name, "rust");
    store.add_moderator(community.id, bob.id).await.unwrap();
    assert!(store.is_moderator(community.id, bob.id).await.unwrap());

    store.remove_member(community.id, bob.id).await.unwrap();
    assert!(!store.is_moderator(community.id, bob.id).await.unwrap());

    let now = Utc::now();
    store
        .upsert_ban(NewBan {
            community_id: community.id,
            user_id: bob.id,
            banned_by: alice.id,
            reason: "first".to_string(),
            expires_at: Some(now - Duration::hours(1)),
        })
        .await
        .unwrap();
    assert!(store.active_ban(community.id, bob.id, now).await.unwrap().is_none());

    let ban = store
        .upsert_ban(NewBan {
            community_id: community.id,
            user_id: bob.id,
            banned_by: alice.id,
            reason: "second".to_string(),
            expires_at: None,
        })
        .await
        .unwrap();
    assert_eq!(ban.reason, "second");
    assert_eq!(store.list_bans(community.id, now).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
#[serial]
async fn test_posts_replies_and_feed() {
    let store = test_pg_store().await;
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;
    let community = store
        .create_community(NewCommunity {
            name: "rust".to_string(),
            description: String::new(),
            admin_id: alice.id,
        })
        .await
        .unwrap();

    let post = store
        .create_post(NewPost {
            community_id: community.id,
            author_id: alice.id,
            title: "Hello".to_string(),
            body: "World".to_string(),
        })
        .await
        .unwrap();
    store
        .create_reply(NewReply {
            post_id: post.id,
            author_id: bob.id,
            body: "Hi".to_string(),
        })
        .await
        .unwrap();

    let post = store.post_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(post.reply_count, 1);
    assert_eq!(post.community_name, "rust");

    store.follow(bob.id, alice.id).await.unwrap();
    assert!(store.is_following(bob.id, alice.id).await.unwrap());
    assert!(!store.is_following(alice.id, bob.id).await.unwrap());
    let feed = store.feed(bob.id, PageParams::new(0, 10)).await.unwrap();
    assert_eq!(feed.total_elements, 1);

    assert!(store.delete_community(community.id).await.unwrap());
    assert!(store.post_by_id(post.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
#[serial]
async fn test_chat_history_and_summaries() {
    let store = test_pg_store().await;
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;

    for (from, to, content) in [(&alice, &bob, "one"), (&bob, &alice, "two")] {
        store
            .save_message(NewChatMessage {
                sender_id: from.id,
                recipient_id: to.id,
                content: content.to_string(),
            })
            .await
            .unwrap();
    }

    let history = store
        .conversation(alice.id, bob.id, PageParams::new(0, 10))
        .await
        .unwrap();
    assert_eq!(history.total_elements, 2);
    assert_eq!(history.content[0].content, "two");

    let chats = store.recent_chats(alice.id).await.unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].partner_username, "bob");
}
