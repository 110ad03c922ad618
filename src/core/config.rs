use std::env;
use std::time::Duration;

use url::Url;

use crate::ai::ModelProvider;
use crate::errors::ConfigError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_MURF_BASE_URL: &str = "https://api.murf.ai/v1/";
pub const DEFAULT_VOICE_ID: &str = "en-US-natalie";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Upper bound for `MAX_RETRIES`.
pub const MAX_RETRIES_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_provider: ModelProvider,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: Url,
    pub openai_api_key: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Url,
    pub murf_api_key: Option<String>,
    pub murf_voice_id: String,
    pub murf_base_url: Url,
    pub request_timeout: Duration,
    pub max_retries: usize,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns an error if a variable is present but unusable (unknown
    /// provider, malformed URL, non-numeric timeout). Missing credentials are
    /// reported later, by the component that needs them.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let model_provider = match var("MODEL_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => ModelProvider::default(),
        };

        let request_timeout = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| ConfigError::InvalidValue {
                    name: "REQUEST_TIMEOUT_SECS",
                    reason: format!("{e}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        name: "REQUEST_TIMEOUT_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let max_retries = match var("MAX_RETRIES") {
            Some(raw) => {
                let retries: usize = raw.parse().map_err(|e| ConfigError::InvalidValue {
                    name: "MAX_RETRIES",
                    reason: format!("{e}"),
                })?;
                if retries > MAX_RETRIES_LIMIT {
                    return Err(ConfigError::InvalidValue {
                        name: "MAX_RETRIES",
                        reason: format!("must be at most {MAX_RETRIES_LIMIT}"),
                    });
                }
                retries
            }
            None => 0,
        };

        Ok(Self {
            model_provider,
            gemini_api_key: var("GEMINI_API_KEY").or_else(|| var("GOOGLE_AI_API_KEY")),
            gemini_model: var("GEMINI_MODEL")
                .unwrap_or_else(|| ModelProvider::Gemini.default_model().to_string()),
            gemini_base_url: base_url(
                "GEMINI_BASE_URL",
                var("GEMINI_BASE_URL"),
                DEFAULT_GEMINI_BASE_URL,
            )?,
            openai_api_key: var("OPENAI_API_KEY"),
            openai_org_id: var("OPENAI_ORG_ID"),
            openai_model: var("OPENAI_MODEL")
                .unwrap_or_else(|| ModelProvider::OpenAi.default_model().to_string()),
            openai_base_url: base_url(
                "OPENAI_BASE_URL",
                var("OPENAI_BASE_URL"),
                DEFAULT_OPENAI_BASE_URL,
            )?,
            murf_api_key: var("MURF_API_KEY"),
            murf_voice_id: var("MURF_VOICE_ID").unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
            murf_base_url: base_url("MURF_BASE_URL", var("MURF_BASE_URL"), DEFAULT_MURF_BASE_URL)?,
            request_timeout,
            max_retries,
        })
    }
}

// `Url::join` drops the last path segment unless the base ends with '/'.
fn base_url(name: &'static str, raw: Option<String>, default: &str) -> Result<Url, ConfigError> {
    let mut value = raw.unwrap_or_else(|| default.to_string());
    if !value.ends_with('/') {
        value.push('/');
    }
    Url::parse(&value).map_err(|e| ConfigError::InvalidValue {
        name,
        reason: format!("{e}"),
    })
}
