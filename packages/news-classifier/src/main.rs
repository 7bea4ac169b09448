// Entry point for the classification batch

use anyhow::{Context, Result};
use news_classifier::domains::classification::run_batch;
use news_classifier::kernel::{AirtableNewsStore, OpenAICompletionModel};
use news_classifier::{logging, Config};
use openai_client::OpenAIClient;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    news_classifier::load_dotenv();
    logging::init(Path::new(news_classifier::LOG_FILE))?;
    tracing::info!("Starting classify");

    let config = Config::from_env().context("Failed to load configuration")?;

    let store = AirtableNewsStore::from_config(&config);
    let model = OpenAICompletionModel::new(OpenAIClient::new(config.openai_api_key.clone()));

    let report = run_batch(&store, &model, &config)
        .await
        .context("Classification batch aborted")?;
    report.log();

    Ok(())
}
