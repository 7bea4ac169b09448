use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys a model answer must carry to count as a classification.
pub const REQUIRED_KEYS: [&str; 3] = ["summary", "tags", "categories"];

/// Structured answer parsed from the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub summary: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    #[serde(default)]
    pub countries: Option<Vec<String>>,
}

/// Why an answer could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not JSON at all
    MalformedJson(String),
    /// JSON object without some of the required keys
    MissingFields(Vec<String>),
    /// JSON of the wrong shape (not an object, or a field of the wrong type)
    WrongShape(String),
}

impl InvalidReason {
    /// Malformed and shape errors are both "could not read"; missing keys are
    /// "read, but incomplete".
    pub fn is_incomplete(&self) -> bool {
        matches!(self, InvalidReason::MissingFields(_))
    }
}

/// Model answer, decided once after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationResponse {
    Valid(Classification),
    Invalid { raw_text: String, reason: InvalidReason },
}

/// Fields written back to a news row after a successful classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationUpdate {
    pub summary: String,
    pub tags: String,
    pub categories: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<String>,
    pub tokens: usize,
    pub price: f64,
}

impl ClassificationUpdate {
    pub fn new(classification: &Classification, tokens: usize, price: f64) -> Self {
        // An empty list is not written so it never clears an existing value.
        let countries = classification
            .countries
            .as_ref()
            .filter(|countries| !countries.is_empty())
            .map(|countries| countries.join(", "));

        Self {
            summary: classification.summary.clone(),
            tags: classification.tags.join(", "),
            categories: classification.categories.join(", "),
            countries,
            tokens,
            price,
        }
    }

    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("summary".into(), Value::String(self.summary));
        fields.insert("tags".into(), Value::String(self.tags));
        fields.insert("categories".into(), Value::String(self.categories));
        if let Some(countries) = self.countries {
            fields.insert("countries".into(), Value::String(countries));
        }
        fields.insert("tokens".into(), Value::from(self.tokens));
        fields.insert("price".into(), Value::from(self.price));
        fields
    }
}
