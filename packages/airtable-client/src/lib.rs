//! Pure Airtable REST API client.
//!
//! A minimal client for the Airtable Web API. Supports listing records with a
//! filter formula (following pagination) and partial updates of one record.
//!
//! # Example
//!
//! ```rust,ignore
//! use airtable_client::{field_equals, AirtableClient};
//!
//! let client = AirtableClient::new("pat...");
//!
//! let rows: Vec<Record<serde_json::Value>> = client
//!     .list_records("appXXXX", "News", &field_equals("summary", ""))
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{AirtableError, Result};
pub use types::{ListResponse, Record, UpdateRequest};

use reqwest::Url;
use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://api.airtable.com/v0";

#[derive(Clone)]
pub struct AirtableClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl AirtableClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn table_url(&self, base_id: &str, table: &str, record_id: Option<&str>) -> Result<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| AirtableError::Url(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AirtableError::Url(format!("{} cannot be a base", self.base_url)))?;
            segments.pop_if_empty().push(base_id).push(table);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// List every record matching `formula`, following `offset` cursors until
    /// the last page. Records come back in server order.
    pub async fn list_records<F: DeserializeOwned>(
        &self,
        base_id: &str,
        table: &str,
        formula: &str,
    ) -> Result<Vec<Record<F>>> {
        let url = self.table_url(base_id, table, None)?;
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(url.clone())
                .bearer_auth(&self.token)
                .query(&[("filterByFormula", formula)]);
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let resp = request.send().await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(AirtableError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let page: ListResponse<F> = resp.json().await?;
            tracing::debug!(table, page_size = page.records.len(), "Fetched Airtable page");
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    /// Update only the given fields of one record.
    pub async fn update_record(
        &self,
        base_id: &str,
        table: &str,
        record_id: &str,
        fields: &serde_json::Map<String, serde_json::Value>,
        typecast: bool,
    ) -> Result<()> {
        let url = self.table_url(base_id, table, Some(record_id))?;
        let resp = self
            .client
            .patch(url)
            .bearer_auth(&self.token)
            .json(&UpdateRequest { fields, typecast })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AirtableError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::debug!(table, record_id, field_count = fields.len(), typecast, "Updated Airtable record");
        Ok(())
    }
}

/// Quote `value` as an Airtable formula string literal.
pub fn escape_formula_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

/// Formula matching records whose `field` equals `value` exactly.
pub fn field_equals(field: &str, value: &str) -> String {
    format!("{{{}}}={}", field, escape_formula_string(value))
}
