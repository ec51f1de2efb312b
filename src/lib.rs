pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod likes;
pub mod logging;
pub mod parsing;
pub mod types {
    pub mod dataset;
    pub mod quote;
}

pub use catalog::{derive, FilterConfig, SortKey, ViewState};
pub use likes::LikeStore;
pub use types::dataset::{Dataset, LoadReport};
pub use types::quote::{Difficulty, Language, Quote, VocabularyEntry, VocabularyInsight};
