// Mock collaborators for testing
//
// Both mocks record every call so tests can assert on what was (and was not)
// sent to the store and to the model.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::{BaseCompletionModel, BaseNewsStore, Completion, FieldMap};
use crate::domains::classification::models::Article;

// =============================================================================
// Mock News Store
// =============================================================================

/// Arguments captured from an update call
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCall {
    pub article_id: String,
    pub fields: FieldMap,
    pub typecast: bool,
}

#[derive(Default)]
pub struct MockNewsStore {
    articles: Arc<Mutex<Vec<Article>>>,
    fetch_error: Option<String>,
    fail_updates_for: Option<String>,
    fetch_calls: Arc<Mutex<usize>>,
    updates: Arc<Mutex<Vec<UpdateCall>>>,
}

impl MockNewsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_article(self, article: Article) -> Self {
        self.articles.lock().unwrap().push(article);
        self
    }

    /// Make `fetch_unclassified` fail like a bad key or dead network would
    pub fn with_fetch_error(mut self, message: &str) -> Self {
        self.fetch_error = Some(message.to_string());
        self
    }

    /// Make updates of one article fail
    pub fn with_update_error_for(mut self, article_id: &str) -> Self {
        self.fail_updates_for = Some(article_id.to_string());
        self
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock().unwrap()
    }

    pub fn updates(&self) -> Vec<UpdateCall> {
        self.updates.lock().unwrap().clone()
    }

    pub fn updates_for(&self, article_id: &str) -> Vec<UpdateCall> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.article_id == article_id)
            .cloned()
            .collect()
    }

    /// Current state of an article with all updates applied
    pub fn article(&self, article_id: &str) -> Option<Article> {
        self.articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == article_id)
            .cloned()
    }
}

#[async_trait]
impl BaseNewsStore for MockNewsStore {
    async fn fetch_unclassified(&self) -> Result<Vec<Article>> {
        *self.fetch_calls.lock().unwrap() += 1;

        if let Some(message) = &self.fetch_error {
            return Err(anyhow!("{}", message));
        }

        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.summary.as_deref().unwrap_or("").is_empty())
            .cloned()
            .collect())
    }

    async fn update_fields(&self, article_id: &str, fields: FieldMap, typecast: bool) -> Result<()> {
        if self.fail_updates_for.as_deref() == Some(article_id) {
            return Err(anyhow!("update of {} rejected", article_id));
        }

        self.updates.lock().unwrap().push(UpdateCall {
            article_id: article_id.to_string(),
            fields: fields.clone(),
            typecast,
        });

        // Apply to stored rows so a second run sees the new state
        let mut articles = self.articles.lock().unwrap();
        if let Some(article) = articles.iter_mut().find(|a| a.id == article_id) {
            if let Some(summary) = fields.get("summary").and_then(|v| v.as_str()) {
                article.summary = Some(summary.to_string());
            }
            if let Some(errors) = fields.get("errors").and_then(|v| v.as_u64()) {
                article.errors = errors;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Mock Completion Model
// =============================================================================

/// Arguments captured from an ask call
#[derive(Debug, Clone, PartialEq)]
pub struct AskCall {
    pub model: String,
    pub system_message: String,
    pub prompt: String,
}

pub struct MockCompletionModel {
    answers: Arc<Mutex<VecDeque<String>>>,
    default_answer: String,
    token_estimates: HashMap<String, usize>,
    input_price: f64,
    output_price: f64,
    fail_after: Option<usize>,
    calls: Arc<Mutex<Vec<AskCall>>>,
}

impl MockCompletionModel {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(VecDeque::new())),
            default_answer: r#"{"summary":"Mock summary.","tags":["Mock"],"categories":["general"]}"#
                .to_string(),
            token_estimates: HashMap::new(),
            input_price: 0.0,
            output_price: 0.0,
            fail_after: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an answer; queued answers are returned in order before the default
    pub fn with_answer(self, answer: &str) -> Self {
        self.answers.lock().unwrap().push_back(answer.to_string());
        self
    }

    /// Pin the token estimate for an exact content string
    pub fn with_token_estimate(mut self, content: &str, tokens: usize) -> Self {
        self.token_estimates.insert(content.to_string(), tokens);
        self
    }

    pub fn with_prices(mut self, input_price: f64, output_price: f64) -> Self {
        self.input_price = input_price;
        self.output_price = output_price;
        self
    }

    /// Make every ask fail like a transport error would
    pub fn failing(self) -> Self {
        self.failing_after(0)
    }

    /// Answer the first `successes` asks, then fail every later one
    pub fn failing_after(mut self, successes: usize) -> Self {
        self.fail_after = Some(successes);
        self
    }

    pub fn calls(&self) -> Vec<AskCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn models_used(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.model.clone()).collect()
    }
}

impl Default for MockCompletionModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCompletionModel for MockCompletionModel {
    fn estimate_tokens(&self, text: &str) -> usize {
        self.token_estimates
            .get(text)
            .copied()
            .unwrap_or_else(|| openai_client::estimate_tokens(text))
    }

    async fn ask(&self, model: &str, system_message: &str, prompt: &str) -> Result<Completion> {
        let earlier_calls = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(AskCall {
                model: model.to_string(),
                system_message: system_message.to_string(),
                prompt: prompt.to_string(),
            });
            calls.len() - 1
        };

        if self.fail_after.is_some_and(|successes| earlier_calls >= successes) {
            return Err(anyhow!("connection reset by peer"));
        }

        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_answer.clone());

        Ok(Completion {
            answer,
            input_price: self.input_price,
            output_price: self.output_price,
        })
    }
}
