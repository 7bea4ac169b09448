use crate::config::{Config, Thresholds};

/// Context-window tier of the completion model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Standard,
    Extended,
}

impl ModelTier {
    pub fn model_id(self, config: &Config) -> &str {
        match self {
            ModelTier::Standard => &config.standard_model,
            ModelTier::Extended => &config.extended_model,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Too large to send; count it as an error without calling the model
    Cancel,
    Classify(ModelTier),
}

/// Decide what to do with an article of `tokens` estimated tokens.
/// Depends on nothing but the estimate, so tiers never carry across articles.
pub fn gate(tokens: usize, thresholds: &Thresholds) -> GateDecision {
    if tokens > thresholds.cancel_above {
        GateDecision::Cancel
    } else if tokens > thresholds.extended_above {
        GateDecision::Classify(ModelTier::Extended)
    } else {
        GateDecision::Classify(ModelTier::Standard)
    }
}
