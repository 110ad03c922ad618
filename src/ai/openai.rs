//! `OpenAI` Chat Completions summarization backend.

use std::time::Duration;

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, error};
use url::Url;

use super::backend::{GenerationParams, SummarizationBackend};
use crate::errors::{BackendError, ConfigError};

pub struct OpenAiBackend {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model: String,
    endpoint: Url,
}

impl OpenAiBackend {
    /// # Errors
    ///
    /// Returns an error if the API key is blank, the endpoint cannot be formed
    /// from `base_url`, or the HTTP client cannot be built.
    pub fn new(
        api_key: &str,
        org_id: Option<String>,
        model: &str,
        base_url: &Url,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("OPENAI_API_KEY"));
        }

        let endpoint = base_url
            .join("chat/completions")
            .map_err(|e| ConfigError::InvalidValue {
                name: "OPENAI_BASE_URL",
                reason: format!("{e}"),
            })?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(format!("OpenAI: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            org_id,
            model: model.to_string(),
            endpoint,
        })
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap, BackendError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|e| BackendError::Http(format!("Invalid Authorization header: {e}")))?;
        headers.insert("Authorization", auth_value);

        if let Some(org) = &self.org_id {
            let org_value = org.parse().map_err(|e| {
                BackendError::Http(format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            headers.insert("OpenAI-Organization", org_value);
        }

        Ok(headers)
    }
}

#[must_use]
pub fn build_prompt(system_prompt: &str, user_prompt: &str) -> Vec<ChatCompletionMessage> {
    vec![
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(system_prompt.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(user_prompt.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}

/// Chat Completions `messages` array. Only text content is sent.
pub(crate) fn build_messages_json(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .filter_map(|m| {
            let role_str = match m.role {
                MessageRole::system => "system",
                MessageRole::user | MessageRole::function | MessageRole::tool => "user",
                MessageRole::assistant => "assistant",
            };
            match &m.content {
                Content::Text(t) => Some(json!({ "role": role_str, "content": t })),
                Content::ImageUrl(_) => None,
            }
        })
        .collect()
}

#[must_use]
pub fn build_request_body(
    model: &str,
    prompt: &[ChatCompletionMessage],
    params: &GenerationParams,
) -> Value {
    json!({
        "model": model,
        "messages": build_messages_json(prompt),
        "max_tokens": params.max_tokens,
        "temperature": params.temperature,
    })
}

/// Text of the first choice, if present.
#[must_use]
pub fn extract_text(response_json: &Value) -> Option<String> {
    response_json
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(std::string::ToString::to_string)
}

#[async_trait]
impl SummarizationBackend for OpenAiBackend {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, BackendError> {
        let prompt = build_prompt(system_prompt, user_prompt);
        let request_body = build_request_body(&self.model, &prompt, params);
        debug!(endpoint = %self.endpoint, model = %self.model, "Making OpenAI API request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                BackendError::Http(format!("OpenAI API request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!(
                    "Failed to read error response body (status {status}): {}",
                    e.without_url()
                )
            });
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| {
                BackendError::Parse(format!("OpenAI response: {}", e.without_url()))
            })?;

        Ok(extract_text(&response_json).unwrap_or_default())
    }
}
