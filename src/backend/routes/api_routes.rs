/**
 * API Route Handlers
 *
 * Wires the auth, user, community and post handlers onto their paths.
 * Authentication is enforced by the `AuthUser` extractor inside each
 * handler, so public and protected routes live side by side.
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, signup};
use crate::backend::communities::{
    add_moderator, ban_user, create_community, delete_community, get_community, join_community,
    leave_community, list_bans, list_communities, list_members, remove_moderator, unban_user,
    update_community,
};
use crate::backend::posts::{
    create_post, create_reply, delete_post, delete_reply, get_post, list_community_posts,
    list_replies, update_post, update_reply,
};
use crate::backend::server::state::AppState;
use crate::backend::users::{
    delete_me, delete_user, feed, follow_user, get_user, list_followers, list_following,
    list_user_communities, list_user_posts, list_users, set_admin, unfollow_user, update_me,
};

/// Authentication endpoints
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
}

/// Profiles, follows and the personal feed
///
/// `/api/users/me` is registered before `/api/users/{username}`; axum
/// prefers the static segment.
pub fn configure_user_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/users", get(list_users))
        .route("/api/users/me", axum::routing::patch(update_me).delete(delete_me))
        .route("/api/users/{username}", get(get_user).delete(delete_user))
        .route("/api/users/{username}/admin", put(set_admin))
        .route(
            "/api/users/{username}/follow",
            post(follow_user).delete(unfollow_user),
        )
        .route("/api/users/{username}/followers", get(list_followers))
        .route("/api/users/{username}/following", get(list_following))
        .route("/api/users/{username}/posts", get(list_user_posts))
        .route("/api/users/{username}/communities", get(list_user_communities))
        .route("/api/feed", get(feed))
}

/// Communities, membership, moderators and bans
pub fn configure_community_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/communities",
            get(list_communities).post(create_community),
        )
        .route(
            "/api/communities/{name}",
            get(get_community)
                .patch(update_community)
                .delete(delete_community),
        )
        .route(
            "/api/communities/{name}/join",
            post(join_community).delete(leave_community),
        )
        .route("/api/communities/{name}/members", get(list_members))
        .route(
            "/api/communities/{name}/moderators/{username}",
            put(add_moderator).delete(remove_moderator),
        )
        .route(
            "/api/communities/{name}/bans",
            get(list_bans).post(ban_user),
        )
        .route(
            "/api/communities/{name}/bans/{username}",
            axum::routing::delete(unban_user),
        )
}

/// Posts and replies
pub fn configure_post_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/communities/{name}/posts",
            get(list_community_posts).post(create_post),
        )
        .route(
            "/api/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route(
            "/api/posts/{id}/replies",
            get(list_replies).post(create_reply),
        )
        .route(
            "/api/replies/{id}",
            axum::routing::patch(update_reply).delete(delete_reply),
        )
}

/// Every REST route under `/api` except chat
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    let router = configure_auth_routes(router);
    let router = configure_user_routes(router);
    let router = configure_community_routes(router);
    configure_post_routes(router)
}
