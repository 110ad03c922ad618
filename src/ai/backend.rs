use async_trait::async_trait;

use crate::errors::BackendError;

/// Decoding parameters shared by every summarization backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.3,
        }
    }
}

/// A chat-style LLM endpoint that turns a system instruction plus one user
/// prompt into text.
#[async_trait]
pub trait SummarizationBackend: Send + Sync {
    /// Model identifier reported alongside successful summaries.
    fn model_name(&self) -> &str;

    /// # Errors
    ///
    /// Returns the backend's raw failure; callers normalize it.
    async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, BackendError>;
}
