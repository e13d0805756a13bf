/**
 * Authentication Handler Types
 *
 * Request and response types used by the signup, login and me handlers.
 */

use serde::{Deserialize, Serialize};

use crate::shared::forum::UserProfile;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SignupRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    /// Username, or the email address if it contains `@`
    pub username: String,
    pub password: String,
}

/// Returned by signup and login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    /// JWT token for authentication
    pub token: String,
    /// The caller's own profile (includes email)
    pub user: UserProfile,
}
