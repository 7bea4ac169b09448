use serde::{Deserialize, Deserializer};

/// One news row as the classifier sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: Option<String>,
    /// Absent when the row has no body; such rows are skipped.
    pub content: Option<String>,
    pub summary: Option<String>,
    /// Failed classification attempts across all runs.
    pub errors: u64,
}

impl Article {
    pub fn from_fields(id: impl Into<String>, fields: ArticleFields) -> Self {
        Self {
            id: id.into(),
            title: fields.title,
            content: fields.content,
            summary: fields.summary,
            errors: fields.errors,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }

    /// Counter value to persist after one more failed attempt.
    pub fn next_error_count(&self) -> u64 {
        self.errors + 1
    }
}

/// Field map of a news row. Airtable leaves empty cells out entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub errors: u64,
}

// Number cells can come back as floats depending on the field's precision.
fn deserialize_counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.max(0.0) as u64).unwrap_or(0))
}
