pub mod article;
pub mod classification;
pub mod report;

pub use article::{Article, ArticleFields};
pub use classification::{
    Classification, ClassificationResponse, ClassificationUpdate, InvalidReason, REQUIRED_KEYS,
};
pub use report::{BatchReport, Outcome};
