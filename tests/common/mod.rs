//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A full application on top of `MemoryStore`
//! - Signup and authentication helpers
//! - PostgreSQL fixtures for the ignored database tests
//! - Error body assertions

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
