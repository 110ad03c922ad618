//! Gemini (Generative Language API) summarization backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use super::backend::{GenerationParams, SummarizationBackend};
use crate::errors::{BackendError, ConfigError};

const TOP_P: f32 = 0.8;
const TOP_K: u32 = 40;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let collected: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if collected.is_empty() {
            None
        } else {
            Some(collected.concat())
        }
    }
}

#[must_use]
pub fn build_request(
    system_prompt: &str,
    user_prompt: &str,
    params: &GenerationParams,
) -> GenerateRequest {
    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: Some(system_prompt.to_string()),
            }],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(user_prompt.to_string()),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: params.temperature,
            max_output_tokens: params.max_tokens,
            top_p: TOP_P,
            top_k: TOP_K,
        },
    }
}

/// Pulls `error.message` and `error.status` out of a Gemini error body, falling
/// back to the raw text. The status (e.g. `RESOURCE_EXHAUSTED`) is kept because
/// error classification matches on it.
fn extract_error_message(error_text: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(error_text) else {
        return error_text.to_string();
    };
    let Some(err) = json.get("error") else {
        return error_text.to_string();
    };

    let message = err.get("message").and_then(Value::as_str);
    let status = err.get("status").and_then(Value::as_str);
    let reason = err
        .get("details")
        .and_then(Value::as_array)
        .and_then(|d| d.iter().find_map(|x| x.get("reason").and_then(Value::as_str)));

    match (message, status) {
        (Some(m), Some(s)) => match reason {
            Some(r) => format!("{s} ({r}): {m}"),
            None => format!("{s}: {m}"),
        },
        (Some(m), None) => m.to_string(),
        _ => error_text.to_string(),
    }
}

pub struct GeminiBackend {
    http: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl GeminiBackend {
    /// # Errors
    ///
    /// Returns an error if the API key is blank, the endpoint cannot be formed
    /// from `base_url`, or the HTTP client cannot be built.
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &Url,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("GEMINI_API_KEY"));
        }

        let endpoint = base_url
            .join(&format!("models/{model}:generateContent"))
            .map_err(|e| ConfigError::InvalidValue {
                name: "GEMINI_BASE_URL",
                reason: format!("{e}"),
            })?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(format!("Gemini: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
            endpoint,
        })
    }
}

#[async_trait]
impl SummarizationBackend for GeminiBackend {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, BackendError> {
        let request = build_request(system_prompt, user_prompt, params);
        debug!(endpoint = %self.endpoint, model = %self.model, "Making Gemini API request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!(
                    "Failed to read error response body (status {status}): {}",
                    e.without_url()
                )
            });
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: extract_error_message(&error_text),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| {
                BackendError::Parse(format!("Gemini response: {}", e.without_url()))
            })?;

        Ok(body.text().unwrap_or_default())
    }
}
