//! Ask one question and report its estimated size and actual cost

use openai_client::{estimate_tokens, pricing_for, ChatRequest, Message, OpenAIClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OpenAIClient::from_env()?;

    let prompt = "Summarize in one sentence: Berlin startups are 3D printing meat substitutes.";
    println!("Estimated prompt tokens: {}", estimate_tokens(prompt));

    let response = client
        .chat_completion(
            ChatRequest::new("gpt-3.5-turbo")
                .message(Message::system("You are a concise news editor."))
                .message(Message::user(prompt))
                .max_tokens(100),
        )
        .await?;

    println!("Response: {}", response.content);

    if let Some(usage) = &response.usage {
        let (input, output) = pricing_for(&response.model).cost(usage);
        println!(
            "{} prompt + {} completion tokens, ${:.5}",
            usage.prompt_tokens,
            usage.completion_tokens,
            input + output
        );
    }

    Ok(())
}
