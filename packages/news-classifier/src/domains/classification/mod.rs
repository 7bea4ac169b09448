//! Classification of news articles: fetch, gate, classify, reconcile.

pub mod activities;
pub mod models;
pub mod prompts;

// Re-export commonly used types
pub use activities::{run_batch, GateDecision, ModelTier};
pub use models::{Article, BatchReport, ClassificationResponse, InvalidReason, Outcome};
