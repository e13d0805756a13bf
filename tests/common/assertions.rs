//! Assertions on API responses
//!
//! Every failing endpoint answers `{"error": "...", "status": <code>}`;
//! these helpers check both the HTTP status and that body.

use axum::http::StatusCode;
use axum_test::TestResponse;

/// Assert the status code and that the JSON error body matches it
pub fn assert_error(response: &TestResponse, status: StatusCode) -> String {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], status.as_u16());
    body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("error body without message: {}", body))
        .to_string()
}

/// Like [`assert_error`], also checking the message text
pub fn assert_error_contains(response: &TestResponse, status: StatusCode, needle: &str) {
    let message = assert_error(response, status);
    assert!(
        message.contains(needle),
        "Expected '{}' to contain '{}'",
        message,
        needle
    );
}

/// Assert a 2xx status with a readable failure message
pub fn assert_status(response: &TestResponse, status: StatusCode) {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
}
