/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 * Keys are derived once from the configured secret and shared through
 * `AppState`.
 */

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as TokenError, ErrorKind};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username at the time the token was issued
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Upper bound on token lifetime: one year
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

/// Signing and verification keys for session tokens
#[derive(Clone)]
pub struct TokenKeys {
    inner: Arc<Keys>,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("ttl_hours", &self.inner.ttl.num_hours())
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// `ttl_hours` is clamped to `MAX_TOKEN_TTL_HOURS` in either direction
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        let ttl_hours = ttl_hours.clamp(-MAX_TOKEN_TTL_HOURS, MAX_TOKEN_TTL_HOURS);
        Self {
            inner: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                ttl: Duration::hours(ttl_hours),
            }),
        }
    }

    /// Create a JWT token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID)
    /// * `username` - Username embedded in the claims
    pub fn create_token(&self, user_id: Uuid, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: (now + self.inner.ttl).timestamp().max(0) as u64,
            iat: now.timestamp().max(0) as u64,
        };

        encode(&Header::default(), &claims, &self.inner.encoding)
    }

    /// Verify and decode a JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.inner.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Extract user ID from token
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.verify_token(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| TokenError::from(ErrorKind::InvalidSubject))
    }
}
