//! API integration tests
//!
//! Integration tests for all API endpoints

mod auth_test;
mod calendar_test;
mod gantt_test;
mod ordering_test;
mod vault_test;
