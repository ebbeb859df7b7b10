//! Web page content used to enrich prompts

mod content;
mod fetcher;

pub use content::{extract_urls, PageContent, MAX_TEXT_BLOCKS, MIN_BLOCK_CHARS};
pub use fetcher::{summarize, PageFetcher};

#[cfg(test)]
pub use fetcher::mock;
