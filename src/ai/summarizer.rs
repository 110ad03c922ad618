//! Email summarization over a pluggable LLM backend.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

use super::backend::{GenerationParams, SummarizationBackend};
use super::gemini::GeminiBackend;
use super::openai::OpenAiBackend;
use super::prompt_builder::{
    ContentCheck, SYSTEM_PROMPT, build_summary_prompt, check_content, fit_body_to_budget,
};
use super::provider::ModelProvider;
use crate::core::config::AppConfig;
use crate::core::models::SummaryResult;
use crate::errors::{BackendError, ConfigError, SummarizationError};

/// Model name reported when a summary was synthesized without a model call.
pub const SHORT_EMAIL_MODEL: &str = "short_email_handler";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorClass {
    RateLimited,
    InvalidCredentials,
    QuotaExceeded,
}

const OPENAI_ERROR_MARKERS: &[(&str, ErrorClass)] = &[
    ("rate_limit_exceeded", ErrorClass::RateLimited),
    ("invalid_api_key", ErrorClass::InvalidCredentials),
    ("insufficient_quota", ErrorClass::QuotaExceeded),
];

const GEMINI_ERROR_MARKERS: &[(&str, ErrorClass)] = &[
    ("api_key_invalid", ErrorClass::InvalidCredentials),
    ("quota_exceeded", ErrorClass::QuotaExceeded),
    ("rate_limit", ErrorClass::RateLimited),
];

/// Maps a raw backend failure onto the shared error vocabulary.
///
/// Each provider has its own marker strings; the first marker found (case
/// insensitive) wins. A bare HTTP 429 counts as rate limiting. Anything else
/// keeps the original message.
#[must_use]
pub fn normalize_backend_error(provider: ModelProvider, error: &BackendError) -> SummarizationError {
    let message = error.to_string();
    let lowered = message.to_ascii_lowercase();

    let markers = match provider {
        ModelProvider::OpenAi => OPENAI_ERROR_MARKERS,
        ModelProvider::Gemini => GEMINI_ERROR_MARKERS,
    };

    let class = markers
        .iter()
        .find(|(marker, _)| lowered.contains(marker))
        .map(|(_, class)| *class)
        .or(match error {
            BackendError::Api { status: 429, .. } => Some(ErrorClass::RateLimited),
            _ => None,
        });

    match class {
        Some(ErrorClass::RateLimited) => SummarizationError::RateLimited { provider },
        Some(ErrorClass::InvalidCredentials) => SummarizationError::InvalidCredentials { provider },
        Some(ErrorClass::QuotaExceeded) => SummarizationError::QuotaExceeded { provider },
        None => SummarizationError::Backend(message),
    }
}

/// Snapshot of the summarizer's settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderInfo {
    pub provider: ModelProvider,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Summarizes emails with one configured LLM backend.
///
/// The provider is fixed for the lifetime of an instance; use
/// [`EmailSummarizer::with_provider`] to obtain a summarizer for another one.
pub struct EmailSummarizer {
    provider: ModelProvider,
    backend: Arc<dyn SummarizationBackend>,
    params: GenerationParams,
    max_retries: usize,
}

impl EmailSummarizer {
    /// # Errors
    ///
    /// Returns an error if the configured provider's credential is missing or
    /// its client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::for_provider(config.model_provider, config)
    }

    /// # Errors
    ///
    /// Same as [`EmailSummarizer::from_config`], for an explicit provider.
    pub fn for_provider(provider: ModelProvider, config: &AppConfig) -> Result<Self, ConfigError> {
        let backend = build_backend(provider, config)?;
        info!(
            provider = provider.as_str(),
            model = backend.model_name(),
            "Initialized summarization backend"
        );
        Ok(Self::with_backend(provider, backend).with_max_retries(config.max_retries))
    }

    #[must_use]
    pub fn with_backend(provider: ModelProvider, backend: Arc<dyn SummarizationBackend>) -> Self {
        Self {
            provider,
            backend,
            params: GenerationParams::default(),
            max_retries: 0,
        }
    }

    /// Retries transient backend failures up to `max_retries` times with
    /// exponential backoff. Zero disables retrying.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Builds a new summarizer for `provider`, re-initializing the backend
    /// client. `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the new provider cannot be initialized.
    pub fn with_provider(
        &self,
        provider: ModelProvider,
        config: &AppConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::for_provider(provider, config)?.with_max_retries(self.max_retries))
    }

    #[must_use]
    pub const fn provider(&self) -> ModelProvider {
        self.provider
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    #[must_use]
    pub fn provider_info(&self) -> ProviderInfo {
        ProviderInfo {
            provider: self.provider,
            model: self.model_name().to_string(),
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        }
    }

    /// Summarizes one email. Never fails outright: every failure is reported
    /// as [`SummaryResult::Failure`] with a normalized error.
    pub async fn summarize(&self, subject: &str, sender: &str, body: &str) -> SummaryResult {
        match check_content(subject, sender, body) {
            ContentCheck::Missing => {
                return self.failure(SummarizationError::MissingContent);
            }
            ContentCheck::Brief(summary) => {
                info!(provider = self.provider.as_str(), "Short email, skipping model call");
                return SummaryResult::Success {
                    summary,
                    provider: self.provider,
                    model: SHORT_EMAIL_MODEL.to_string(),
                };
            }
            ContentCheck::Summarize => {}
        }

        let body = fit_body_to_budget(subject, sender, body);
        let prompt = build_summary_prompt(subject, sender, &body);

        #[cfg(feature = "debug-logs")]
        info!("Using summary prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            provider = self.provider.as_str(),
            prompt_chars = prompt.chars().count(),
            "Requesting email summary"
        );

        match self.invoke_backend(&prompt).await {
            Ok(text) => {
                let summary = text.trim();
                if summary.is_empty() {
                    warn!(provider = self.provider.as_str(), "Model returned an empty summary");
                    return self.failure(SummarizationError::EmptyResponse);
                }
                SummaryResult::Success {
                    summary: summary.to_string(),
                    provider: self.provider,
                    model: self.model_name().to_string(),
                }
            }
            Err(e) => {
                warn!(provider = self.provider.as_str(), "Summarization backend failed: {}", e);
                self.failure(normalize_backend_error(self.provider, &e))
            }
        }
    }

    async fn invoke_backend(&self, prompt: &str) -> Result<String, BackendError> {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(100)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(self.max_retries);

        RetryIf::spawn(
            strategy,
            || self.backend.invoke(SYSTEM_PROMPT, prompt, &self.params),
            BackendError::is_transient,
        )
        .await
    }

    fn failure(&self, error: SummarizationError) -> SummaryResult {
        SummaryResult::Failure {
            error,
            provider: self.provider,
        }
    }
}

fn build_backend(
    provider: ModelProvider,
    config: &AppConfig,
) -> Result<Arc<dyn SummarizationBackend>, ConfigError> {
    match provider {
        ModelProvider::Gemini => {
            let key = config
                .gemini_api_key
                .as_deref()
                .ok_or(ConfigError::MissingCredential("GEMINI_API_KEY"))?;
            Ok(Arc::new(GeminiBackend::new(
                key,
                &config.gemini_model,
                &config.gemini_base_url,
                config.request_timeout,
            )?))
        }
        ModelProvider::OpenAi => {
            let key = config
                .openai_api_key
                .as_deref()
                .ok_or(ConfigError::MissingCredential("OPENAI_API_KEY"))?;
            Ok(Arc::new(OpenAiBackend::new(
                key,
                config.openai_org_id.clone(),
                &config.openai_model,
                &config.openai_base_url,
                config.request_timeout,
            )?))
        }
    }
}
