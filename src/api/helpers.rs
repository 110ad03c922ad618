//! Response builders for API Gateway proxy responses.
//!
//! Every response carries permissive CORS headers so browser clients can call
//! the endpoint directly.

use serde::Serialize;
use serde_json::{Value, json};

fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": "GET, POST, OPTIONS",
        "Access-Control-Allow-Headers": "*",
    })
}

/// Returns a response with `body` serialized as JSON.
#[must_use]
pub fn json_response<T: Serialize>(status_code: u16, body: &T) -> Value {
    let body = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    json!({
        "statusCode": status_code,
        "headers": cors_headers(),
        "body": body
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

/// Returns the health-check response.
#[must_use]
pub fn health() -> Value {
    json_response(200, &json!({ "status": "ok", "message": "API is running" }))
}

/// Returns a 204 response for CORS preflight requests.
#[must_use]
pub fn preflight() -> Value {
    json!({
        "statusCode": 204,
        "headers": cors_headers(),
        "body": ""
    })
}
