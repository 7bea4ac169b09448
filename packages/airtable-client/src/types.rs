use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single row of an Airtable table with typed fields.
///
/// Airtable omits empty cells from `fields`, so `F` should use `Option` or
/// `#[serde(default)]` for anything that may be blank.
#[derive(Debug, Clone, Deserialize)]
pub struct Record<F> {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: Option<DateTime<Utc>>,
    pub fields: F,
}

/// One page of a list-records response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<F> {
    pub records: Vec<Record<F>>,
    /// Cursor for the next page; absent on the last page.
    pub offset: Option<String>,
}

/// Body of a PATCH update for a single record.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest<'a> {
    pub fields: &'a serde_json::Map<String, serde_json::Value>,
    /// Let Airtable coerce strings into select options, numbers, etc.
    pub typecast: bool,
}
