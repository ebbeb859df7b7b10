use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of text blocks kept from a page
pub const MAX_TEXT_BLOCKS: usize = 50;

/// Blocks must be longer than this many characters to be kept
pub const MIN_BLOCK_CHARS: usize = 20;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"'()\[\]{}]+"#).expect("Invalid URL regex"));

/// Text extracted from a fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub url: String,
    pub title: String,
    pub description: String,
    pub blocks: Vec<String>,
}

impl PageContent {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Add a text block if it is long enough and the block limit is not reached
    ///
    /// Returns whether the block was kept.
    pub fn push_block(&mut self, text: &str) -> bool {
        let text = text.trim();
        if self.blocks.len() >= MAX_TEXT_BLOCKS || text.chars().count() <= MIN_BLOCK_CHARS {
            return false;
        }
        self.blocks.push(text.to_string());
        true
    }

    /// Plain-text rendering injected into prompts
    pub fn to_prompt_text(&self) -> String {
        format!(
            "Page title: {}\nMeta description: {}\n\nMain content:\n{}",
            self.title,
            self.description,
            self.blocks.join("\n")
        )
    }
}

/// All http(s) URLs in free text, in order of appearance
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']).to_string())
        .collect()
}
