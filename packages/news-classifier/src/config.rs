use anyhow::{Context, Result};
use std::env;
use std::path::Path;

use crate::domains::classification::prompts::CATEGORIES;

/// Airtable base holding the news table.
pub const AIRTABLE_BASE_ID: &str = "applCPBBlTlF2v1NE";

pub const NEWS_TABLE: &str = "News";

/// Append-only run log, relative to the working directory.
pub const LOG_FILE: &str = "logs/classify.log";

pub const STANDARD_MODEL: &str = "gpt-3.5-turbo";

pub const EXTENDED_MODEL: &str = "gpt-3.5-turbo-16k";

/// Token limits that decide how (and whether) an article is sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Above this estimate the 16K-context model is used. Leaves headroom
    /// under 16K for the system prompt, its examples and the response.
    pub extended_above: usize,
    /// Above this estimate the article is not sent at all.
    pub cancel_above: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            extended_above: 3_300,
            cancel_above: 10_000,
        }
    }
}

/// Runner configuration: secrets from the environment, everything else fixed.
#[derive(Debug, Clone)]
pub struct Config {
    pub airtable_api_key: String,
    pub openai_api_key: String,
    pub airtable_base_id: String,
    pub news_table: String,
    pub standard_model: String,
    pub extended_model: String,
    pub thresholds: Thresholds,
    pub categories: Vec<String>,
}

impl Config {
    /// Build a config with the fixed defaults and the given API keys.
    pub fn new(airtable_api_key: impl Into<String>, openai_api_key: impl Into<String>) -> Self {
        Self {
            airtable_api_key: airtable_api_key.into(),
            openai_api_key: openai_api_key.into(),
            airtable_base_id: AIRTABLE_BASE_ID.to_string(),
            news_table: NEWS_TABLE.to_string(),
            standard_model: STANDARD_MODEL.to_string(),
            extended_model: EXTENDED_MODEL.to_string(),
            thresholds: Thresholds::default(),
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        load_dotenv();

        Ok(Self::new(
            env::var("AIRTABLE_API_KEY").context("AIRTABLE_API_KEY must be set")?,
            env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
        ))
    }
}

/// Load `.env` from the working directory (or a parent) if present.
/// Variables already set in the environment win.
///
/// Call before `logging::init` so a `RUST_LOG` kept in `.env` applies.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Load a specific env file. Variables already set in the environment win.
pub fn load_env_file(path: &Path) -> Result<()> {
    dotenvy::from_path(path)
        .with_context(|| format!("Failed to load env file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = Config::new("pat", "sk");

        assert_eq!(config.airtable_base_id, "applCPBBlTlF2v1NE");
        assert_eq!(config.news_table, "News");
        assert_eq!(config.standard_model, "gpt-3.5-turbo");
        assert_eq!(config.extended_model, "gpt-3.5-turbo-16k");
        assert_eq!(config.thresholds.extended_above, 3_300);
        assert_eq!(config.thresholds.cancel_above, 10_000);
        assert_eq!(config.categories.len(), 13);
    }

    #[test]
    fn test_escalation_sits_below_cancellation() {
        let thresholds = Thresholds::default();
        assert!(thresholds.extended_above < thresholds.cancel_above);
    }

    #[test]
    fn test_env_file_sets_log_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "CLASSIFY_TEST_LOG_FILTER=news_classifier=debug\n").unwrap();

        load_env_file(&path).unwrap();

        assert_eq!(
            logging::env_filter("CLASSIFY_TEST_LOG_FILTER").to_string(),
            "news_classifier=debug"
        );
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(&dir.path().join(".env")).is_err());
    }
}
