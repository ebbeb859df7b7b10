//! Keyword metrics providers

mod keyword_tool;
mod synthetic;

pub use keyword_tool::{KeywordToolClient, KeywordToolConfig};
pub use synthetic::SyntheticKeywordProvider;
