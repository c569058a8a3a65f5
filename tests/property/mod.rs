//! Property-based tests

pub mod shared_proptest;
