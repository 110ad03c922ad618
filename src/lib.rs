/// Email Reader - summarizes an email with an LLM and reads the summary aloud.
///
/// The crate exposes a single Lambda-hosted HTTP endpoint that accepts an email
/// (subject, sender, body), asks a configurable LLM backend for a short summary,
/// renders that summary to speech and returns a link to the audio file.
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda (API Gateway proxy events) for the inbound HTTP surface
/// - Gemini (primary) or `OpenAI` (secondary) for summarization
/// - Murf for text-to-speech
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use email_reader::core::config::AppConfig;
/// use email_reader::core::models::EmailInput;
/// use email_reader::pipeline::SummarizationPipeline;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     email_reader::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let pipeline = SummarizationPipeline::from_config(&config)?;
///
///     let email = EmailInput::new(
///         "Quarterly planning",
///         "lead@example.com",
///         "Please send your Q3 estimates by Friday so we can finalize the roadmap.",
///     )?;
///
///     let response = pipeline.run(&email).await?;
///     println!("{} -> {}", response.summary, response.summary_audio_link);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod pipeline;
pub mod tts;

pub use errors::{
    BackendError, ConfigError, PipelineError, SpeechError, SummarizationError, ValidationError,
};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output goes to stdout as JSON lines suitable for `CloudWatch` Logs. The level
/// comes from `RUST_LOG` when set; otherwise `APP_ENV=debug` selects `debug`
/// and anything else selects `info`. Calling this more than once is harmless.
///
/// # Example
///
/// ```
/// email_reader::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let default_level = match std::env::var("APP_ENV") {
        Ok(env) if env.eq_ignore_ascii_case("debug") => "debug",
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!(level = default_level, "Logger initialized");
    }
}
