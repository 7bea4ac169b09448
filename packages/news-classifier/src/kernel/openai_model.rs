// Completion model backed by OpenAI
//
// This is the infrastructure implementation of BaseCompletionModel.
// What to ask (prompts, tiers) lives in domains/classification.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{estimate_tokens, pricing_for, ChatRequest, Message, OpenAIClient};

use super::{BaseCompletionModel, Completion};

#[derive(Clone)]
pub struct OpenAICompletionModel {
    client: OpenAIClient,
}

impl OpenAICompletionModel {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseCompletionModel for OpenAICompletionModel {
    fn estimate_tokens(&self, text: &str) -> usize {
        estimate_tokens(text)
    }

    async fn ask(&self, model: &str, system_message: &str, prompt: &str) -> Result<Completion> {
        let request = ChatRequest::new(model)
            .message(Message::system(system_message))
            .message(Message::user(prompt));

        let response = self
            .client
            .chat_completion(request)
            .await
            .with_context(|| format!("Failed to call OpenAI model {}", model))?;

        let (input_price, output_price) = match &response.usage {
            Some(usage) => pricing_for(&response.model).cost(usage),
            None => {
                tracing::warn!(model = %response.model, "OpenAI response carried no usage, recording zero cost");
                (0.0, 0.0)
            }
        };

        tracing::debug!(
            model = %response.model,
            answer_length = response.content.len(),
            input_price,
            output_price,
            "OpenAI answer received"
        );

        Ok(Completion {
            answer: response.content,
            input_price,
            output_price,
        })
    }
}
