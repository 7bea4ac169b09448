//! Token estimation for budgeting prompts before they are sent.
//!
//! The estimate is a character heuristic, not a BPE count. It is close enough
//! to pick a context window and to refuse oversized requests.

/// Approximate characters per token for English prose.
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the number of tokens in `text`, rounding up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}
