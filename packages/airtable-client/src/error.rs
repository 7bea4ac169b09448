use thiserror::Error;

pub type Result<T> = std::result::Result<T, AirtableError>;

#[derive(Debug, Error)]
pub enum AirtableError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Airtable API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    Url(String),
}
