//! Property-based tests
//!
//! Uses proptest to generate random inputs for validation and paging.

mod pagination_proptest;
mod validation_proptest;
