use anyhow::Result;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domains::classification::models::{
    Article, Classification, ClassificationResponse, ClassificationUpdate, InvalidReason, Outcome,
    REQUIRED_KEYS,
};
use crate::kernel::{BaseNewsStore, Completion, FieldMap};

/// Longest slice of a bad answer echoed into the debug log.
const RAW_PREVIEW_CHARS: usize = 200;

/// Parse a model answer into a classification, or say why it is unusable.
pub fn parse_classification(answer: &str) -> ClassificationResponse {
    let invalid = |reason| ClassificationResponse::Invalid {
        raw_text: answer.to_string(),
        reason,
    };

    let value: Value = match serde_json::from_str(answer) {
        Ok(value) => value,
        Err(e) => return invalid(InvalidReason::MalformedJson(e.to_string())),
    };

    let Some(object) = value.as_object() else {
        return invalid(InvalidReason::WrongShape("expected a JSON object".into()));
    };

    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return invalid(InvalidReason::MissingFields(missing));
    }

    match serde_json::from_value::<Classification>(value) {
        Ok(classification) => ClassificationResponse::Valid(classification),
        Err(e) => invalid(InvalidReason::WrongShape(e.to_string())),
    }
}

/// Categories the model returned that are not in `vocabulary` (case-insensitive).
pub fn unknown_categories<'a>(classification: &'a Classification, vocabulary: &[String]) -> Vec<&'a str> {
    classification
        .categories
        .iter()
        .filter(|category| {
            !vocabulary
                .iter()
                .any(|known| known.eq_ignore_ascii_case(category.trim()))
        })
        .map(String::as_str)
        .collect()
}

/// Bump the article's error counter by one, relative to the value fetched
/// at the start of the batch.
pub async fn record_error(store: &dyn BaseNewsStore, article: &Article) -> Result<()> {
    let mut fields = FieldMap::new();
    fields.insert("errors".into(), Value::from(article.next_error_count()));
    store.update_fields(&article.id, fields, false).await
}

/// Validate the model answer and persist exactly one of: the classification,
/// or an error increment.
pub async fn reconcile(
    store: &dyn BaseNewsStore,
    article: &Article,
    tokens: usize,
    completion: &Completion,
    vocabulary: &[String],
) -> Result<Outcome> {
    match parse_classification(&completion.answer) {
        ClassificationResponse::Valid(classification) => {
            let unknown = unknown_categories(&classification, vocabulary);
            if !unknown.is_empty() {
                warn!(article_id = %article.id, categories = ?unknown, "Categories outside the vocabulary");
            }

            let price = completion.price();
            let update = ClassificationUpdate::new(&classification, tokens, price);
            if let Some(countries) = &update.countries {
                info!(countries = %countries, "Adding countries");
            }

            debug!(
                update = %serde_json::to_string(&update).unwrap_or_default(),
                "Classification update"
            );
            info!(article_id = %article.id, price, "JSON valid, saving to Airtable");
            store
                .update_fields(&article.id, update.into_fields(), true)
                .await?;

            Ok(Outcome::Classified { tokens, price })
        }
        ClassificationResponse::Invalid { raw_text, reason } => {
            match &reason {
                InvalidReason::MalformedJson(e) => {
                    error!(article_id = %article.id, error = %e, "Invalid JSON, skipping")
                }
                InvalidReason::MissingFields(missing) => {
                    error!(article_id = %article.id, missing = ?missing, "JSON missing required fields, skipping")
                }
                InvalidReason::WrongShape(e) => {
                    error!(article_id = %article.id, error = %e, "JSON has unexpected shape, skipping")
                }
            }
            debug!(
                raw = %raw_text.chars().take(RAW_PREVIEW_CHARS).collect::<String>(),
                "Rejected answer"
            );

            record_error(store, article).await?;
            Ok(Outcome::Invalid(reason))
        }
    }
}
