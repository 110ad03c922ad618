//! All AI/LLM functionality

pub mod backend;
pub mod gemini;
pub mod openai;
pub mod prompt_builder;
pub mod provider;
pub mod summarizer;

// Re-export main types for convenience
pub use backend::{GenerationParams, SummarizationBackend};
pub use provider::ModelProvider;
pub use summarizer::{EmailSummarizer, ProviderInfo, SHORT_EMAIL_MODEL, normalize_backend_error};
