use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::models::EmailPayload;

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

/// HTTP method of an API Gateway proxy event (HTTP API v2 or REST v1 shape),
/// upper-cased.
pub fn request_method(payload: &Value) -> Option<String> {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
        .map(str::to_ascii_uppercase)
}

pub fn request_path(payload: &Value) -> Option<&str> {
    v_str(payload, &["rawPath"]).or_else(|| v_str(payload, &["path"]))
}

/// Request body as text, decoding it when API Gateway marked it base64.
pub fn extract_body(payload: &Value) -> Result<String, String> {
    let Some(body) = payload.get("body").and_then(Value::as_str) else {
        return Err("Missing body".to_string());
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !is_base64 {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| format!("Invalid base64 body: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("Body is not valid UTF-8: {e}"))
}

pub fn parse_email_payload(body: &str) -> Result<EmailPayload, String> {
    serde_json::from_str(body).map_err(|e| format!("Invalid request body: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_and_path_from_http_api_event() {
        let event = json!({
            "rawPath": "/api/v1/summarize",
            "requestContext": { "http": { "method": "post" } }
        });
        assert_eq!(request_method(&event).as_deref(), Some("POST"));
        assert_eq!(request_path(&event), Some("/api/v1/summarize"));
    }

    #[test]
    fn method_and_path_from_rest_event() {
        let event = json!({ "path": "/health", "httpMethod": "GET" });
        assert_eq!(request_method(&event).as_deref(), Some("GET"));
        assert_eq!(request_path(&event), Some("/health"));
    }

    #[test]
    fn body_is_base64_decoded_when_flagged() {
        let event = json!({ "body": "eyJhIjoxfQ==", "isBase64Encoded": true });
        assert_eq!(extract_body(&event).unwrap(), r#"{"a":1}"#);

        let event = json!({ "body": "!!!", "isBase64Encoded": true });
        assert!(extract_body(&event).unwrap_err().contains("Invalid base64"));

        assert_eq!(extract_body(&json!({})).unwrap_err(), "Missing body");
    }

    #[test]
    fn payload_requires_all_fields() {
        let err = parse_email_payload(r#"{"subject":"s","sender":"x"}"#).unwrap_err();
        assert!(err.contains("missing field `body`"));
    }
}
