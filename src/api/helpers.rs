//! Common helper functions for the Lambda handlers.
//!
//! Lambda HTTP integrations expect `{ statusCode, headers, body }` where `body`
//! is a string, so every builder serializes its JSON body up front.

use serde_json::{Value, json};

// ============================================================================
// Response Builders
// ============================================================================

/// Returns a 200 OK response with `{"ok": true}`.
#[must_use]
pub fn ok_ack() -> Value {
    ok_json(&json!({ "ok": true }))
}

/// Returns a 200 OK response with `{"ok": true, "message": ...}`.
#[must_use]
pub fn ok_message(message: &str) -> Value {
    ok_json(&json!({ "ok": true, "message": message }))
}

/// Returns a 200 OK response with the given JSON body.
#[must_use]
pub fn ok_json(body: &Value) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "error": message }).to_string()
    })
}

/// Returns a 405 that names the only accepted method.
#[must_use]
pub fn method_not_allowed() -> Value {
    json!({
        "statusCode": 405,
        "headers": { "Content-Type": "application/json", "Allow": "POST" },
        "body": json!({ "error": "Method Not Allowed" }).to_string()
    })
}

/// Relays a failed upstream answer: same status, upstream body as details.
#[must_use]
pub fn upstream_error(status_code: u16, upstream_body: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": json!({
            "error": "Failed to fetch news",
            "details": upstream_body
        })
        .to_string()
    })
}

/// Status code of a response built by this module.
#[must_use]
pub fn status_of(response: &Value) -> Option<u16> {
    response
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn err_response_wraps_message() {
        let v = err_response(500, "boom");
        assert_eq!(status_of(&v), Some(500));
        let body: Value = serde_json::from_str(v["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["error"], "boom");
    }

    #[test]
    fn method_not_allowed_sets_allow_header() {
        let v = method_not_allowed();
        assert_eq!(status_of(&v), Some(405));
        assert_eq!(v["headers"]["Allow"], "POST");
    }

    #[test]
    fn upstream_error_keeps_status_and_details() {
        let v = upstream_error(503, "maintenance");
        assert_eq!(status_of(&v), Some(503));
        let body: Value = serde_json::from_str(v["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["details"], "maintenance");
    }
}
