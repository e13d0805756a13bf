//! Authentication Module
//!
//! This module handles user authentication, registration, and session management.
//!
//! # Architecture
//!
//! - **`sessions`** - JWT token generation and validation (`TokenKeys`)
//! - **`passwords`** - bcrypt hashing
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── sessions.rs     - JWT token management
//! ├── passwords.rs    - Password hashing
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - User registration handler
//!     ├── login.rs    - User authentication handler
//!     └── me.rs       - Get current user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username, email and password → user created → JWT returned
//! 2. **Login**: username (or email) and password → verified → JWT returned
//! 3. **Get Me**: JWT in `Authorization` header → own profile returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Tokens expire after `auth.token_ttl_hours` (30 days by default)
//! - Invalid credentials return 401 (no information leakage)

/// JWT token generation and validation
pub mod sessions;

/// Password hashing
pub mod passwords;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest};
pub use handlers::{get_me, login, signup};
pub use sessions::{Claims, TokenKeys};
