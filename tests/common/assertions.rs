//! Custom assertion macros and utilities
//!
//! Every response uses the `{message, data}` envelope; these helpers check
//! the status and unwrap `data`.

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert the status and return the envelope's `data`
#[track_caller]
pub fn expect_data(response: &TestResponse, status: StatusCode) -> Value {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    let body: Value = response.json();
    assert!(body.get("message").is_some(), "missing message in {body}");
    body["data"].clone()
}

/// Assert an error status and return the envelope's `data` text
#[track_caller]
pub fn expect_error(response: &TestResponse, status: StatusCode) -> String {
    let data = expect_data(response, status);
    data.as_str()
        .unwrap_or_else(|| panic!("error data should be text, got {data}"))
        .to_string()
}
