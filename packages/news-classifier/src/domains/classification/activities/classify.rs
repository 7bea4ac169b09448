use anyhow::Result;
use tracing::debug;

use crate::domains::classification::prompts::build_prompt;
use crate::kernel::{BaseCompletionModel, Completion};

/// Ask `model_id` to classify one article body.
///
/// The model tier and system message are passed in per call; nothing about
/// the previous article leaks into this one. Transport failures propagate.
pub async fn classify_article(
    model: &dyn BaseCompletionModel,
    model_id: &str,
    system_message: &str,
    content: &str,
) -> Result<Completion> {
    let prompt = build_prompt(content);

    debug!(model = model_id, prompt_length = prompt.len(), "Requesting classification");

    model.ask(model_id, system_message, &prompt).await
}
