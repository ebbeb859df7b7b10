//! Fetch a web page and extract its readable text

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::domain::page::{PageContent, PageFetcher};
use crate::domain::DomainError;
use crate::infrastructure::llm::HttpClientTrait;

/// [`PageFetcher`] that downloads HTML and extracts title, meta description
/// and content blocks (`h1`-`h3`, `p`, `li`)
#[derive(Debug)]
pub struct HtmlPageFetcher<C: HttpClientTrait> {
    client: C,
}

impl<C: HttpClientTrait> HtmlPageFetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Parse an HTML document into page content
    pub fn extract(url: &str, html: &str) -> PageContent {
        let document = Html::parse_document(html);
        let mut page = PageContent::new(url);

        if let Some(title) = first_text(&document, "title") {
            page.title = title;
        }

        if let Ok(selector) = Selector::parse(r#"meta[name="description"]"#) {
            page.description = document
                .select(&selector)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(normalize_whitespace)
                .unwrap_or_default();
        }

        if let Ok(selector) = Selector::parse("h1, h2, h3, p, li") {
            for element in document.select(&selector) {
                let text = normalize_whitespace(&element.text().collect::<String>());
                page.push_block(&text);
            }
        }

        page
    }
}

#[async_trait]
impl<C: HttpClientTrait> PageFetcher for HtmlPageFetcher<C> {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<PageContent, DomainError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DomainError::validation(format!(
                "URL must start with http:// or https://: '{}'",
                url
            )));
        }

        let body = self.client.get_text(url).await.map_err(|e| match e {
            DomainError::Service { message, .. } => DomainError::service("fetch", message),
            other => other,
        })?;

        let page = Self::extract(url, &body);
        debug!(blocks = page.blocks.len(), "Extracted page content");
        Ok(page)
    }
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
