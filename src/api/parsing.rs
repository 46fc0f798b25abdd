//! Decoding of Lambda HTTP events (API Gateway payload v1/v2 and Function URLs).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::errors::RelayError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method of the request, upper-cased as sent.
pub fn request_method(payload: &Value) -> Option<&str> {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
}

/// True for an `EventBridge` scheduled invocation, which carries no HTTP method.
pub fn is_scheduled_event(payload: &Value) -> bool {
    v_str(payload, &["detail-type"]) == Some("Scheduled Event")
}

pub fn get_header_value<'a>(payload: &'a Value, name: &str) -> Option<&'a str> {
    let headers = payload.get("headers")?;
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Request body as text, decoding base64 when the event says so.
pub fn extract_body(payload: &Value) -> Result<String, RelayError> {
    let Some(body) = payload.get("body") else {
        return Err(RelayError::ParseError("Missing body".to_string()));
    };
    let Some(body_str) = body.as_str() else {
        return Err(RelayError::ParseError("Invalid body format".to_string()));
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !is_base64 {
        return Ok(body_str.to_string());
    }

    let bytes = STANDARD
        .decode(body_str)
        .map_err(|e| RelayError::ParseError(format!("Failed to decode base64 body: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| RelayError::ParseError(format!("Body is not valid UTF-8: {e}")))
}
