//! Test suite for Townsquare
//!
//! This module organizes all tests. Everything except the `database`
//! group runs against the in-memory store, so no PostgreSQL is needed.

pub mod common;
pub mod integration;
pub mod property;
