/**
 * Authentication Extractors
 *
 * This module provides the extractors that protect routes requiring
 * authentication. They read the JWT from the `Authorization: Bearer`
 * header, verify it and load the user from the store.
 *
 * - `AuthUser` rejects the request with 401 when there is no valid session
 * - `MaybeAuthUser` yields `None` instead, for public endpoints that render
 *   differently for the signed-in user
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::error::BackendError;
use crate::backend::policy::Actor;
use crate::backend::server::state::AppState;
use crate::backend::store::User;

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve a token to a stored user
///
/// Returns 401 when the token is invalid or the user no longer exists.
pub async fn authenticate(state: &AppState, token: &str) -> Result<User, BackendError> {
    let user_id = state.tokens.user_id_from_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    state.store.user_by_id(user_id).await?.ok_or_else(|| {
        tracing::warn!("Token for unknown user {}", user_id);
        BackendError::unauthorized("User no longer exists")
    })
}

/// Axum extractor for the authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::from(&self.0)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Authentication required")
        })?;

        Ok(AuthUser(authenticate(state, token).await?))
    }
}

/// Optional variant of [`AuthUser`]
///
/// A missing header yields `None`; a header carrying a bad token is still
/// rejected so clients notice expired sessions.
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(&parts.headers) {
            Some(token) => Ok(MaybeAuthUser(Some(authenticate(state, token).await?))),
            None => Ok(MaybeAuthUser(None)),
        }
    }
}
