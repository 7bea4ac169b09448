//! Kernel module - collaborator seams and their implementations.

pub mod airtable_store;
pub mod openai_model;
pub mod test_dependencies;
pub mod traits;

pub use airtable_store::AirtableNewsStore;
pub use openai_model::OpenAICompletionModel;
pub use test_dependencies::{AskCall, MockCompletionModel, MockNewsStore, UpdateCall};
pub use traits::*;
