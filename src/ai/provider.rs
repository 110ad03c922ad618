use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-001";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// LLM backend used for summarization.
///
/// Gemini is the primary provider and the default; `OpenAI` is the secondary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Gemini,
    OpenAi,
}

impl ModelProvider {
    /// Configuration identifier (`"gemini"` / `"openai"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ModelProvider::Gemini => "gemini",
            ModelProvider::OpenAi => "openai",
        }
    }

    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            ModelProvider::Gemini => DEFAULT_GEMINI_MODEL,
            ModelProvider::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }

    pub(crate) const fn quota_hint(self) -> &'static str {
        match self {
            ModelProvider::Gemini => "Please try again later.",
            ModelProvider::OpenAi => "Please check your billing.",
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelProvider::Gemini => f.write_str("Gemini"),
            ModelProvider::OpenAi => f.write_str("OpenAI"),
        }
    }
}

impl FromStr for ModelProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ModelProvider::Gemini),
            "openai" => Ok(ModelProvider::OpenAi),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}
