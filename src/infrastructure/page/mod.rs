//! Page fetcher implementations

mod html;

pub use html::HtmlPageFetcher;
