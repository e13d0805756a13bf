//! PostgreSQL store tests
//!
//! Ignored by default; see `common::database` for the setup.

mod postgres_test;
