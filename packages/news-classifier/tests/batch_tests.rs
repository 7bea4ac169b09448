//! Integration tests for the classification batch.
//!
//! These drive `run_batch` end to end against the mock store and model and
//! check what was written back for every kind of article.

use news_classifier::domains::classification::{run_batch, Article};
use news_classifier::kernel::{MockCompletionModel, MockNewsStore};
use news_classifier::Config;
use serde_json::json;

/// Helper to create an unclassified article.
fn article(id: &str, content: Option<&str>, errors: u64) -> Article {
    Article {
        id: id.to_string(),
        title: Some(format!("Title {}", id)),
        content: content.map(String::from),
        summary: None,
        errors,
    }
}

fn config() -> Config {
    Config::new("pat-test", "sk-test")
}

const VALID_NO_COUNTRIES: &str = r#"{"summary":"s","tags":["a","b"],"categories":["tech"]}"#;

#[tokio::test]
async fn test_article_without_content_is_skipped_silently() {
    let store = MockNewsStore::new().with_article(article("rec1", None, 0));
    let model = MockCompletionModel::new();

    let report = run_batch(&store, &model, &config()).await.unwrap();

    assert!(store.updates().is_empty());
    assert!(model.calls().is_empty());
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors(), 0);
}

#[tokio::test]
async fn test_over_budget_article_is_cancelled_without_model_call() {
    let store = MockNewsStore::new().with_article(article("rec1", Some("huge"), 2));
    let model = MockCompletionModel::new().with_token_estimate("huge", 10_001);

    let report = run_batch(&store, &model, &config()).await.unwrap();

    assert!(model.calls().is_empty());
    let updates = store.updates_for("rec1");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].fields.len(), 1);
    assert_eq!(updates[0].fields["errors"], json!(3));
    assert_eq!(report.cancelled, 1);
}

#[tokio::test]
async fn test_tier_is_chosen_per_article() {
    let store = MockNewsStore::new()
        .with_article(article("small", Some("small"), 0))
        .with_article(article("big", Some("big"), 0))
        .with_article(article("edge", Some("edge"), 0))
        .with_article(article("limit", Some("limit"), 0))
        .with_article(article("small2", Some("small2"), 0));
    let model = MockCompletionModel::new()
        .with_token_estimate("small", 500)
        .with_token_estimate("big", 3_301)
        .with_token_estimate("edge", 3_300)
        .with_token_estimate("limit", 10_000)
        .with_token_estimate("small2", 12);

    run_batch(&store, &model, &config()).await.unwrap();

    // The extended tier never sticks to the following article
    assert_eq!(
        model.models_used(),
        vec![
            "gpt-3.5-turbo",
            "gpt-3.5-turbo-16k",
            "gpt-3.5-turbo",
            "gpt-3.5-turbo-16k",
            "gpt-3.5-turbo",
        ]
    );
}

#[tokio::test]
async fn test_not_json_increments_errors_and_writes_nothing_else() {
    let store = MockNewsStore::new().with_article(article("rec1", Some("body"), 0));
    let model = MockCompletionModel::new().with_answer("not json");

    let report = run_batch(&store, &model, &config()).await.unwrap();

    let updates = store.updates_for("rec1");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].fields.len(), 1);
    assert_eq!(updates[0].fields["errors"], json!(1));
    assert_eq!(report.malformed, 1);
}

#[tokio::test]
async fn test_missing_keys_are_treated_like_malformed_json_in_store() {
    let store = MockNewsStore::new()
        .with_article(article("bad", Some("one"), 0))
        .with_article(article("partial", Some("two"), 0));
    let model = MockCompletionModel::new()
        .with_answer("{oops")
        .with_answer(r#"{"summary":"s","tags":["a"]}"#);

    let report = run_batch(&store, &model, &config()).await.unwrap();

    assert_eq!(store.updates_for("bad")[0].fields, store.updates_for("partial")[0].fields);
    assert_eq!(report.malformed, 1);
    assert_eq!(report.incomplete, 1);
}

#[tokio::test]
async fn test_valid_answer_without_countries() {
    let store = MockNewsStore::new().with_article(article("rec1", Some("body"), 0));
    let model = MockCompletionModel::new()
        .with_token_estimate("body", 777)
        .with_prices(0.25, 0.5)
        .with_answer(VALID_NO_COUNTRIES);

    let report = run_batch(&store, &model, &config()).await.unwrap();

    let updates = store.updates_for("rec1");
    assert_eq!(updates.len(), 1);
    assert!(updates[0].typecast);
    assert_eq!(
        serde_json::Value::Object(updates[0].fields.clone()),
        json!({
            "summary": "s",
            "tags": "a, b",
            "categories": "tech",
            "tokens": 777,
            "price": 0.75
        })
    );
    assert_eq!(report.classified, 1);
    assert_eq!(report.total_tokens, 777);
    assert_eq!(report.total_price, 0.75);
}

#[tokio::test]
async fn test_empty_countries_are_omitted() {
    let store = MockNewsStore::new().with_article(article("rec1", Some("body"), 0));
    let model = MockCompletionModel::new()
        .with_answer(r#"{"summary":"s","tags":["a"],"categories":["tech"],"countries":[]}"#);

    run_batch(&store, &model, &config()).await.unwrap();

    assert!(!store.updates_for("rec1")[0].fields.contains_key("countries"));
}

#[tokio::test]
async fn test_countries_are_joined() {
    let store = MockNewsStore::new().with_article(article("rec1", Some("body"), 0));
    let model = MockCompletionModel::new().with_answer(
        r#"{"summary":"s","tags":["a"],"categories":["marketing"],"countries":["Japan","United States"]}"#,
    );

    run_batch(&store, &model, &config()).await.unwrap();

    assert_eq!(
        store.updates_for("rec1")[0].fields["countries"],
        json!("Japan, United States")
    );
}

#[tokio::test]
async fn test_prompt_and_system_message_sent() {
    let store = MockNewsStore::new().with_article(article("rec1", Some("Berlin food tech"), 0));
    let model = MockCompletionModel::new();

    run_batch(&store, &model, &config()).await.unwrap();

    let calls = model.calls();
    assert_eq!(calls[0].prompt, "Classify following article:\n\nBerlin food tech");
    assert!(calls[0].system_message.contains("catering, tech, marketing, ai, content, general"));
}

#[tokio::test]
async fn test_second_run_only_sees_unclassified_articles() {
    let store = MockNewsStore::new()
        .with_article(article("ok", Some("fine"), 0))
        .with_article(article("bad", Some("broken"), 0))
        .with_article(article("empty", None, 0));
    let first = MockCompletionModel::new()
        .with_answer(VALID_NO_COUNTRIES)
        .with_answer("nope");

    let report = run_batch(&store, &first, &config()).await.unwrap();
    assert_eq!(report.fetched, 3);

    let second = MockCompletionModel::new().with_answer("nope");
    let report = run_batch(&store, &second, &config()).await.unwrap();

    assert_eq!(report.fetched, 2);
    assert_eq!(second.calls().len(), 1);
    assert_eq!(second.calls()[0].prompt, "Classify following article:\n\nbroken");
    // Counter accumulates across runs
    assert_eq!(store.article("bad").unwrap().errors, 2);
    assert_eq!(store.fetch_calls(), 2);
}

#[tokio::test]
async fn test_every_article_has_exactly_one_outcome() {
    let store = MockNewsStore::new()
        .with_article(article("a", None, 0))
        .with_article(article("b", Some("huge"), 0))
        .with_article(article("c", Some("good"), 0))
        .with_article(article("d", Some("junk"), 0))
        .with_article(article("e", Some("half"), 0));
    let model = MockCompletionModel::new()
        .with_token_estimate("huge", 50_000)
        .with_answer(VALID_NO_COUNTRIES)
        .with_answer("junk")
        .with_answer(r#"{"tags":[],"categories":[]}"#);

    let report = run_batch(&store, &model, &config()).await.unwrap();

    assert_eq!(report.processed(), report.fetched);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.cancelled, 1);
    assert_eq!(report.classified, 1);
    assert_eq!(report.invalid(), 2);

    // One write per non-skipped article, none for the skipped one
    assert!(store.updates_for("a").is_empty());
    for id in ["b", "c", "d", "e"] {
        assert_eq!(store.updates_for(id).len(), 1, "article {}", id);
    }
}

#[tokio::test]
async fn test_fetch_failure_aborts_batch() {
    let store = MockNewsStore::new().with_fetch_error("401 Unauthorized");
    let model = MockCompletionModel::new();

    let err = run_batch(&store, &model, &config()).await.unwrap_err();

    assert!(format!("{:#}", err).contains("401 Unauthorized"));
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_model_failure_aborts_batch_after_earlier_writes() {
    let store = MockNewsStore::new()
        .with_article(article("first", Some("body"), 0))
        .with_article(article("empty", None, 0))
        .with_article(article("second", Some("body"), 0))
        .with_article(article("third", Some("body"), 0));
    let model = MockCompletionModel::new()
        .with_answer(VALID_NO_COUNTRIES)
        .failing_after(1);

    let err = run_batch(&store, &model, &config()).await.unwrap_err();

    assert!(format!("{:#}", err).contains("second"));
    assert_eq!(model.calls().len(), 2);

    // The classification written before the failure stays in place
    let first = store.updates_for("first");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].fields["summary"], json!("s"));
    assert_eq!(store.article("first").unwrap().summary.as_deref(), Some("s"));

    assert_eq!(store.updates().len(), 1);
    assert!(store.article("third").unwrap().summary.is_none());
}

#[tokio::test]
async fn test_store_update_failure_aborts_batch() {
    let store = MockNewsStore::new()
        .with_article(article("first", Some("body"), 0))
        .with_article(article("second", Some("body"), 0))
        .with_update_error_for("first");
    let model = MockCompletionModel::new();

    assert!(run_batch(&store, &model, &config()).await.is_err());
    assert_eq!(model.calls().len(), 1);
}
