//! Authentication Handlers Module
//!
//! Accounts are created with a username, email and password; the password
//! is stored as a bcrypt hash and every successful signup or login answers
//! with a fresh JWT plus the caller's own profile.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup - 201 with token and profile
//! - **`login`** - POST /api/auth/login - by username or email
//! - **`get_me`** - GET /api/auth/me - the authenticated user's profile

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{AuthResponse, LoginRequest, SignupRequest};

pub use login::login;
pub use me::get_me;
pub use signup::signup;
