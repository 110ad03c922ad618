use std::sync::Arc;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

use super::backend::{AudioSettings, SpeechBackend};
use super::murf::MurfBackend;
use crate::core::config::AppConfig;
use crate::core::models::SpeechResult;
use crate::errors::{BackendError, ConfigError, SpeechError};

/// Renders summaries to speech with a fixed audio encoding.
pub struct SpeechSynthesizer {
    backend: Arc<dyn SpeechBackend>,
    default_voice: String,
    settings: AudioSettings,
    max_retries: usize,
}

impl SpeechSynthesizer {
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] if `api_key` is blank.
    pub fn new(
        api_key: &str,
        default_voice: impl Into<String>,
        backend: Arc<dyn SpeechBackend>,
    ) -> Result<Self, ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("MURF_API_KEY"));
        }

        Ok(Self {
            backend,
            default_voice: default_voice.into(),
            settings: AudioSettings::default(),
            max_retries: 0,
        })
    }

    /// Builds a synthesizer backed by Murf.
    ///
    /// # Errors
    ///
    /// Returns an error if `MURF_API_KEY` is missing or the client cannot be
    /// built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .murf_api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredential("MURF_API_KEY"))?;
        let backend = MurfBackend::new(api_key, &config.murf_base_url, config.request_timeout)?;
        info!(voice = %config.murf_voice_id, "Initialized speech backend");

        Ok(Self::new(api_key, config.murf_voice_id.clone(), Arc::new(backend))?
            .with_max_retries(config.max_retries))
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    /// Converts `text` to speech with `voice`, or the default voice when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError::EmptyResult`] if the backend produced no audio
    /// reference and [`SpeechError::Backend`] for any backend failure.
    pub async fn synthesize(
        &self,
        text: impl ToString,
        voice: Option<&str>,
    ) -> Result<SpeechResult, SpeechError> {
        let text = text.to_string();
        let voice = voice.unwrap_or(&self.default_voice);
        info!(voice, chars = text.chars().count(), "Synthesizing speech");

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(100)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(self.max_retries);

        let reference = RetryIf::spawn(
            strategy,
            || self.backend.generate(&text, voice, &self.settings),
            BackendError::is_transient,
        )
        .await
        .map_err(|e| {
            warn!("Speech backend failed: {}", e);
            SpeechError::Backend(e.to_string())
        })?;

        match reference {
            Some(audio_reference) if !audio_reference.trim().is_empty() => {
                Ok(SpeechResult { audio_reference })
            }
            _ => {
                warn!("Speech backend returned no audio reference");
                Err(SpeechError::EmptyResult)
            }
        }
    }
}
