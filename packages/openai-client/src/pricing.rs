//! Per-model prices for turning token usage into dollars.

use tracing::warn;

use crate::types::Usage;

/// Price of a model in US dollars per 1,000 tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl ModelPricing {
    pub const FREE: ModelPricing = ModelPricing {
        input_per_1k: 0.0,
        output_per_1k: 0.0,
    };

    /// Split cost of a completion as `(input_price, output_price)`.
    pub fn cost(&self, usage: &Usage) -> (f64, f64) {
        (
            f64::from(usage.prompt_tokens) * self.input_per_1k / 1000.0,
            f64::from(usage.completion_tokens) * self.output_per_1k / 1000.0,
        )
    }
}

// Longest prefix first so dated snapshots of the 16k model resolve to it.
const PRICE_TABLE: &[(&str, ModelPricing)] = &[
    (
        "gpt-3.5-turbo-16k",
        ModelPricing {
            input_per_1k: 0.003,
            output_per_1k: 0.004,
        },
    ),
    (
        "gpt-3.5-turbo",
        ModelPricing {
            input_per_1k: 0.0015,
            output_per_1k: 0.002,
        },
    ),
    (
        "gpt-4-32k",
        ModelPricing {
            input_per_1k: 0.06,
            output_per_1k: 0.12,
        },
    ),
    (
        "gpt-4",
        ModelPricing {
            input_per_1k: 0.03,
            output_per_1k: 0.06,
        },
    ),
];

/// Look up the price for `model`. Unknown models are free, with a warning.
pub fn pricing_for(model: &str) -> ModelPricing {
    PRICE_TABLE
        .iter()
        .find(|(prefix, _)| model.starts_with(prefix))
        .map(|(_, pricing)| *pricing)
        .unwrap_or_else(|| {
            warn!(model, "No price known for model, recording zero cost");
            ModelPricing::FREE
        })
}
