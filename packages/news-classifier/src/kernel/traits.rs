// Trait definitions for the two external collaborators.
//
// These are INFRASTRUCTURE traits only - no business logic.
// Gating, prompting and reconciling live in domains/classification.
//
// Naming convention: Base* for trait names (e.g., BaseNewsStore)

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domains::classification::models::Article;

/// Partial field update for one record.
pub type FieldMap = Map<String, Value>;

// =============================================================================
// News Store Trait (Infrastructure - tabular datastore)
// =============================================================================

#[async_trait]
pub trait BaseNewsStore: Send + Sync {
    /// All articles whose summary is still empty, in store order
    async fn fetch_unclassified(&self) -> Result<Vec<Article>>;

    /// Overwrite only the given fields of one article.
    /// With `typecast`, the store coerces strings into its own field types.
    async fn update_fields(&self, article_id: &str, fields: FieldMap, typecast: bool)
        -> Result<()>;
}

// =============================================================================
// Completion Model Trait (Infrastructure - LLM text generation)
// =============================================================================

/// Raw model answer with its split cost in dollars.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub answer: String,
    pub input_price: f64,
    pub output_price: f64,
}

impl Completion {
    pub fn price(&self) -> f64 {
        self.input_price + self.output_price
    }
}

#[async_trait]
pub trait BaseCompletionModel: Send + Sync {
    /// Approximate token count of `text`, used for budgeting only
    fn estimate_tokens(&self, text: &str) -> usize;

    /// Send one system message plus one user prompt to `model`
    async fn ask(&self, model: &str, system_message: &str, prompt: &str) -> Result<Completion>;
}
