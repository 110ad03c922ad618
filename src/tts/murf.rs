//! Murf text-to-speech backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

use super::backend::{AudioFormat, AudioSettings, ChannelType, SpeechBackend};
use crate::errors::{BackendError, ConfigError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSpeechRequest<'a> {
    pub text: &'a str,
    pub voice_id: &'a str,
    pub format: AudioFormat,
    pub channel_type: ChannelType,
    pub sample_rate: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSpeechResponse {
    #[serde(default)]
    pub audio_file: Option<String>,
    #[serde(default)]
    pub audio_length_in_seconds: Option<f64>,
}

pub struct MurfBackend {
    http: Client,
    api_key: String,
    endpoint: Url,
}

impl MurfBackend {
    /// # Errors
    ///
    /// Returns an error if the API key is blank, the endpoint cannot be formed
    /// from `base_url`, or the HTTP client cannot be built.
    pub fn new(api_key: &str, base_url: &Url, timeout: Duration) -> Result<Self, ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("MURF_API_KEY"));
        }

        let endpoint = base_url
            .join("speech/generate")
            .map_err(|e| ConfigError::InvalidValue {
                name: "MURF_BASE_URL",
                reason: format!("{e}"),
            })?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(format!("Murf: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            endpoint,
        })
    }
}

#[async_trait]
impl SpeechBackend for MurfBackend {
    async fn generate(
        &self,
        text: &str,
        voice_id: &str,
        settings: &AudioSettings,
    ) -> Result<Option<String>, BackendError> {
        let request = GenerateSpeechRequest {
            text,
            voice_id,
            format: settings.format,
            channel_type: settings.channel_type,
            sample_rate: settings.sample_rate,
        };
        debug!(endpoint = %self.endpoint, voice_id, chars = text.chars().count(), "Making Murf TTS request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("api-key", &self.api_key)
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
            error!("Murf API error ({}): {}", status, error_text);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: GenerateSpeechResponse = response
            .json()
            .await
            .map_err(|e| {
                BackendError::Parse(format!("Murf response: {}", e.without_url()))
            })?;

        if let Some(seconds) = body.audio_length_in_seconds {
            debug!(audio_length_in_seconds = seconds, "Murf rendered audio");
        }

        Ok(body.audio_file)
    }
}
