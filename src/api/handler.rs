//! API Lambda handler - thin router in front of the summarization pipeline.
//!
//! This module handles:
//! - CORS preflight and the health check
//! - Request validation (body, JSON shape, email fields)
//! - Mapping pipeline failures to HTTP status codes

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{helpers, parsing};
use crate::core::models::EmailInput;
use crate::pipeline::SummarizationPipeline;

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails at the Lambda level: every outcome, including bad requests and
/// pipeline failures, is returned as an HTTP response payload.
pub async fn function_handler(
    pipeline: &SummarizationPipeline,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(route(pipeline, &event.payload).await)
}

/// Routes one API Gateway proxy event.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn route(pipeline: &SummarizationPipeline, payload: &Value) -> Value {
    let method = parsing::request_method(payload).unwrap_or_default();
    let path = parsing::request_path(payload).unwrap_or("");
    info!(%method, %path, "API request");

    if method == "OPTIONS" {
        return helpers::preflight();
    }

    if method == "GET" && path.ends_with("/health") {
        return helpers::health();
    }

    if method == "POST" && path.ends_with("/summarize") {
        return handle_summarize(pipeline, payload).await;
    }

    warn!(%method, %path, "No route");
    helpers::err_response(404, "Not found")
}

async fn handle_summarize(pipeline: &SummarizationPipeline, payload: &Value) -> Value {
    let email = match parse_email(payload) {
        Ok(email) => email,
        Err(message) => {
            warn!("Rejected request: {}", message);
            return helpers::err_response(400, &message);
        }
    };

    match pipeline.run(&email).await {
        Ok(response) => {
            info!("Email summarized successfully");
            helpers::json_response(200, &response)
        }
        Err(e) => {
            error!(stage = e.stage(), "Error processing request: {}", e);
            helpers::err_response(e.status_code(), &e.to_string())
        }
    }
}

fn parse_email(payload: &Value) -> Result<EmailInput, String> {
    let body = parsing::extract_body(payload)?;
    let email_payload = parsing::parse_email_payload(&body)?;
    EmailInput::try_from(email_payload).map_err(|e| e.to_string())
}
