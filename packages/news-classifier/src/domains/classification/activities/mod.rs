pub mod classify;
pub mod gate;
pub mod reconcile;
pub mod run_batch;

pub use classify::classify_article;
pub use gate::{gate, GateDecision, ModelTier};
pub use reconcile::{parse_classification, reconcile, record_error, unknown_categories};
pub use run_batch::run_batch;
