use std::sync::Arc;

use email_reader::api::handler;
use email_reader::core::config::AppConfig;
use email_reader::pipeline::SummarizationPipeline;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    email_reader::setup_logging();

    let config = AppConfig::from_env().inspect_err(|e| error!("Config error: {}", e))?;
    let pipeline = Arc::new(
        SummarizationPipeline::from_config(&config)
            .inspect_err(|e| error!("Failed to initialize pipeline: {}", e))?,
    );

    lambda_runtime::run(lambda_runtime::service_fn(move |event| {
        let pipeline = Arc::clone(&pipeline);
        async move { handler(&pipeline, event).await }
    }))
    .await
}
