// News store backed by Airtable
//
// This is the infrastructure implementation of BaseNewsStore.

use airtable_client::{field_equals, AirtableClient, Record};
use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{BaseNewsStore, FieldMap};
use crate::config::Config;
use crate::domains::classification::models::{Article, ArticleFields};

/// Reads and updates rows of the news table in one fixed base.
#[derive(Clone)]
pub struct AirtableNewsStore {
    client: AirtableClient,
    base_id: String,
    table: String,
}

impl AirtableNewsStore {
    pub fn new(client: AirtableClient, base_id: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            client,
            base_id: base_id.into(),
            table: table.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            AirtableClient::new(config.airtable_api_key.clone()),
            config.airtable_base_id.clone(),
            config.news_table.clone(),
        )
    }
}

#[async_trait]
impl BaseNewsStore for AirtableNewsStore {
    async fn fetch_unclassified(&self) -> Result<Vec<Article>> {
        let records: Vec<Record<ArticleFields>> = self
            .client
            .list_records(&self.base_id, &self.table, &field_equals("summary", ""))
            .await
            .with_context(|| format!("Failed to list unclassified rows of {}", self.table))?;

        Ok(records
            .into_iter()
            .map(|record| Article::from_fields(record.id, record.fields))
            .collect())
    }

    async fn update_fields(&self, article_id: &str, fields: FieldMap, typecast: bool) -> Result<()> {
        self.client
            .update_record(&self.base_id, &self.table, article_id, &fields, typecast)
            .await
            .with_context(|| format!("Failed to update {} row {}", self.table, article_id))
    }
}
