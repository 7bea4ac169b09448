use anyhow::{Context, Result};
use tracing::{info, warn};

use super::classify::classify_article;
use super::gate::{gate, GateDecision, ModelTier};
use super::reconcile::{reconcile, record_error};
use crate::config::Config;
use crate::domains::classification::models::{Article, BatchReport, Outcome};
use crate::domains::classification::prompts::build_system_message;
use crate::kernel::{BaseCompletionModel, BaseNewsStore};

/// Classify every article whose summary is still empty, one at a time.
///
/// Each fetched article ends in exactly one outcome: skipped, cancelled,
/// classified or invalid. Store and model failures abort the batch; the
/// articles already written stay written.
pub async fn run_batch(
    store: &dyn BaseNewsStore,
    model: &dyn BaseCompletionModel,
    config: &Config,
) -> Result<BatchReport> {
    let articles = store
        .fetch_unclassified()
        .await
        .context("Failed to fetch unclassified news")?;

    info!("Found {} news to classify", articles.len());

    let system_message = build_system_message(&config.categories);
    let mut report = BatchReport::new(articles.len());

    for article in &articles {
        let outcome = process_article(store, model, config, &system_message, article)
            .await
            .with_context(|| format!("Failed to process article {}", article.id))?;
        report.record(&outcome);
    }

    Ok(report)
}

async fn process_article(
    store: &dyn BaseNewsStore,
    model: &dyn BaseCompletionModel,
    config: &Config,
    system_message: &str,
    article: &Article,
) -> Result<Outcome> {
    let Some(content) = article.content.as_deref() else {
        info!(article_id = %article.id, title = article.display_title(), "No content, skipping");
        return Ok(Outcome::Skipped);
    };

    let tokens = model.estimate_tokens(content);
    info!("Classifying {}, tokens: {}", article.display_title(), tokens);

    let tier = match gate(tokens, &config.thresholds) {
        GateDecision::Cancel => {
            warn!(
                article_id = %article.id,
                tokens,
                limit = config.thresholds.cancel_above,
                "Article over token budget, counting as error"
            );
            record_error(store, article).await?;
            return Ok(Outcome::Cancelled);
        }
        GateDecision::Classify(tier) => tier,
    };

    let model_id = tier.model_id(config);
    if tier == ModelTier::Extended {
        info!(model = model_id, "Using 16k model");
    }

    let completion = classify_article(model, model_id, system_message, content).await?;

    reconcile(store, article, tokens, &completion, &config.categories).await
}
