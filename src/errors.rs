use thiserror::Error;

use crate::ai::ModelProvider;

/// Rejected inbound email. Raised before any backend is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("body must be at least {min} characters after trimming (got {actual})")]
    BodyTooShort { min: usize, actual: usize },
}

/// Startup-time failure: bad provider identifier, missing credential or an
/// unusable setting. Never produced per request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid model provider: {0}. Use 'gemini' or 'openai'")]
    UnknownProvider(String),

    #[error("{0} is required but was not set")]
    MissingCredential(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Raw failure reported by a summarization or speech backend, before it is
/// normalized by the component that owns the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl BackendError {
    /// Whether a retry has a chance of succeeding: transport failures,
    /// throttling and server-side errors.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::Http(_) => true,
            BackendError::Api { status, .. } => *status == 429 || *status >= 500,
            BackendError::Parse(_) => false,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        // Request URLs can carry credentials; never let them reach a message.
        let error = error.without_url();
        match error.status() {
            Some(status) => BackendError::Api {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None => BackendError::Http(error.to_string()),
        }
    }
}

/// Summarization failure in the shared, provider-independent vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizationError {
    #[error("{provider} API rate limit exceeded. Please try again later.")]
    RateLimited { provider: ModelProvider },

    #[error("Invalid {provider} API key. Please check your credentials.")]
    InvalidCredentials { provider: ModelProvider },

    #[error("{} API quota exceeded. {}", .provider, .provider.quota_hint())]
    QuotaExceeded { provider: ModelProvider },

    #[error("Email has no subject or body content")]
    MissingContent,

    #[error("Empty response received from the model")]
    EmptyResponse,

    #[error("{0}")]
    Backend(String),
}

/// Text-to-speech failure. Carries the backend's original message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("Speech synthesis failed: {0}")]
    Backend(String),

    #[error("Speech synthesis returned no audio")]
    EmptyResult,
}

/// Stage-tagged failure returned by the summarize-and-speak pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Failed to generate email summary: {0}")]
    SummaryGenerationFailed(String),

    #[error("Failed to generate audio file: {0}")]
    AudioGenerationFailed(String),

    #[error("An unexpected error occurred while processing the email: {0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Short name of the stage that broke, for logs and metrics labels.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            PipelineError::SummaryGenerationFailed(_) => "summarization",
            PipelineError::AudioGenerationFailed(_) => "speech_synthesis",
            PipelineError::Unexpected(_) => "unexpected",
        }
    }

    /// Every pipeline failure is a server-side failure.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        500
    }
}
