use async_trait::async_trait;
use std::fmt::Debug;
use tracing::warn;

use super::PageContent;
use crate::domain::DomainError;

/// Fetches a URL and extracts its readable text
#[async_trait]
pub trait PageFetcher: Send + Sync + Debug {
    async fn fetch(&self, url: &str) -> Result<PageContent, DomainError>;
}

/// Prompt text for `url`; a fetch failure is rendered as text instead of returned
pub async fn summarize(fetcher: &dyn PageFetcher, url: &str) -> String {
    match fetcher.fetch(url).await {
        Ok(page) => page.to_prompt_text(),
        Err(e) => {
            warn!(url = %url, error = %e, "Page fetch failed");
            format!("Failed to read {}: {}", url, e)
        }
    }
}
