use serde::{Deserialize, Serialize};

use crate::ai::ModelProvider;
use crate::errors::{SummarizationError, ValidationError};

/// Minimum body length, in characters, after trimming.
pub const MIN_BODY_CHARS: usize = 10;

/// Inbound request body as it arrives on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailPayload {
    pub subject: String,
    pub sender: String,
    pub body: String,
}

/// A validated email. Every field is trimmed and non-empty and the body has at
/// least [`MIN_BODY_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailInput {
    subject: String,
    sender: String,
    body: String,
}

impl EmailInput {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any field is empty after trimming or
    /// the body is shorter than [`MIN_BODY_CHARS`].
    pub fn new(
        subject: impl AsRef<str>,
        sender: impl AsRef<str>,
        body: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let subject = subject.as_ref().trim();
        let sender = sender.as_ref().trim();
        let body = body.as_ref().trim();

        if subject.is_empty() {
            return Err(ValidationError::EmptyField("subject"));
        }
        if sender.is_empty() {
            return Err(ValidationError::EmptyField("sender"));
        }
        if body.is_empty() {
            return Err(ValidationError::EmptyField("body"));
        }

        let body_chars = body.chars().count();
        if body_chars < MIN_BODY_CHARS {
            return Err(ValidationError::BodyTooShort {
                min: MIN_BODY_CHARS,
                actual: body_chars,
            });
        }

        Ok(Self {
            subject: subject.to_string(),
            sender: sender.to_string(),
            body: body.to_string(),
        })
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl TryFrom<EmailPayload> for EmailInput {
    type Error = ValidationError;

    fn try_from(payload: EmailPayload) -> Result<Self, Self::Error> {
        EmailInput::new(payload.subject, payload.sender, payload.body)
    }
}

/// Outcome of one summarization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    Success {
        summary: String,
        provider: ModelProvider,
        /// Backend model id, or [`crate::ai::SHORT_EMAIL_MODEL`] for the
        /// short-circuit path.
        model: String,
    },
    Failure {
        error: SummarizationError,
        provider: ModelProvider,
    },
}

impl SummaryResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, SummaryResult::Success { .. })
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        match self {
            SummaryResult::Success { summary, .. } => Some(summary),
            SummaryResult::Failure { .. } => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&SummarizationError> {
        match self {
            SummaryResult::Success { .. } => None,
            SummaryResult::Failure { error, .. } => Some(error),
        }
    }

    #[must_use]
    pub const fn provider(&self) -> ModelProvider {
        match self {
            SummaryResult::Success { provider, .. } | SummaryResult::Failure { provider, .. } => {
                *provider
            }
        }
    }

    #[must_use]
    pub fn model(&self) -> Option<&str> {
        match self {
            SummaryResult::Success { model, .. } => Some(model),
            SummaryResult::Failure { .. } => None,
        }
    }
}

/// Rendered speech for a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechResult {
    pub audio_reference: String,
}

/// Successful response returned to the caller. Both fields are always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResponse {
    pub summary: String,
    pub summary_audio_link: String,
}
