//! Summarize-then-speak orchestration.
//!
//! A request moves through `Received -> Summarized -> Spoken -> Completed`.
//! Any stage may end in `Failed`, and a failed request never yields a partial
//! response.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{error, info};

use crate::ai::EmailSummarizer;
use crate::core::config::AppConfig;
use crate::core::models::{EmailInput, PipelineResponse, SummaryResult};
use crate::errors::{ConfigError, PipelineError};
use crate::tts::SpeechSynthesizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Summarized,
    Spoken,
    Completed,
    Failed,
}

impl PipelineStage {
    /// Stage reached after the current one succeeds. Terminal stages stay put.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            PipelineStage::Received => PipelineStage::Summarized,
            PipelineStage::Summarized => PipelineStage::Spoken,
            PipelineStage::Spoken | PipelineStage::Completed => PipelineStage::Completed,
            PipelineStage::Failed => PipelineStage::Failed,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Completed | PipelineStage::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::Summarized => "summarized",
            PipelineStage::Spoken => "spoken",
            PipelineStage::Completed => "completed",
            PipelineStage::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct SummarizationPipeline {
    summarizer: EmailSummarizer,
    synthesizer: SpeechSynthesizer,
}

impl SummarizationPipeline {
    #[must_use]
    pub const fn new(summarizer: EmailSummarizer, synthesizer: SpeechSynthesizer) -> Self {
        Self {
            summarizer,
            synthesizer,
        }
    }

    /// # Errors
    ///
    /// Returns an error if either provider cannot be initialized.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            EmailSummarizer::from_config(config)?,
            SpeechSynthesizer::from_config(config)?,
        ))
    }

    #[must_use]
    pub const fn summarizer(&self) -> &EmailSummarizer {
        &self.summarizer
    }

    /// Summarizes `email` and renders the summary to speech.
    ///
    /// # Errors
    ///
    /// Returns a stage-tagged [`PipelineError`]; a panic inside either stage is
    /// reported as [`PipelineError::Unexpected`].
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(body_chars = email.body().chars().count())
    )]
    pub async fn run(&self, email: &EmailInput) -> Result<PipelineResponse, PipelineError> {
        match AssertUnwindSafe(self.drive(email)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(stage = %PipelineStage::Failed, "Unexpected error processing email: {}", message);
                Err(PipelineError::Unexpected(message))
            }
        }
    }

    async fn drive(&self, email: &EmailInput) -> Result<PipelineResponse, PipelineError> {
        let mut stage = PipelineStage::Received;
        info!(%stage, "Processing email");

        let summary = match self
            .summarizer
            .summarize(email.subject(), email.sender(), email.body())
            .await
        {
            SummaryResult::Success { summary, provider, model } if !summary.trim().is_empty() => {
                info!(provider = provider.as_str(), %model, "Summary generated");
                summary
            }
            SummaryResult::Success { .. } => {
                return Err(fail(
                    stage,
                    PipelineError::SummaryGenerationFailed("summary was empty".to_string()),
                ));
            }
            SummaryResult::Failure { error, .. } => {
                return Err(fail(
                    stage,
                    PipelineError::SummaryGenerationFailed(error.to_string()),
                ));
            }
        };
        stage = stage.next();
        info!(%stage, "Summary ready, synthesizing speech");

        let speech = self
            .synthesizer
            .synthesize(&summary, None)
            .await
            .map_err(|e| fail(stage, PipelineError::AudioGenerationFailed(e.to_string())))?;
        stage = stage.next();
        info!(%stage, audio = %speech.audio_reference, "Speech ready");

        let response = PipelineResponse {
            summary,
            summary_audio_link: speech.audio_reference,
        };
        stage = stage.next();
        info!(%stage, "Email processed");

        Ok(response)
    }
}

fn fail(stage: PipelineStage, err: PipelineError) -> PipelineError {
    error!(
        from = %stage,
        stage = %PipelineStage::Failed,
        failed_in = err.stage(),
        "{}",
        err
    );
    err
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_order_and_stop_at_terminal() {
        let mut stage = PipelineStage::Received;
        let mut seen = vec![stage];
        while !stage.is_terminal() {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                PipelineStage::Received,
                PipelineStage::Summarized,
                PipelineStage::Spoken,
                PipelineStage::Completed,
            ]
        );
        assert_eq!(PipelineStage::Failed.next(), PipelineStage::Failed);
        assert!(PipelineStage::Failed.is_terminal());
    }

    #[test]
    fn panic_payloads_become_messages() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(boxed.as_ref()), "owned boom");
        let boxed: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
