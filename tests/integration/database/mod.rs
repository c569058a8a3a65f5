//! Database-level tests against an in-memory SQLite

pub mod migrations_test;
