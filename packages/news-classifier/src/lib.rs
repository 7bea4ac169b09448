// News classifier - batch runner
//
// Fetches unclassified news rows from Airtable, asks an OpenAI chat model for
// a summary, tags, categories and countries, and writes the result (or an
// error count) back to each row.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod logging;

pub use config::*;
