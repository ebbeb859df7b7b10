//! Keyword metrics domain

mod metric;
mod provider;

pub use metric::{
    render_table, seed_keywords, synthetic_metrics, KeywordMetric, MAX_SEED_KEYWORDS,
    SYNTHETIC_SUFFIXES,
};
pub use provider::{KeywordMetricsProvider, MAX_KEYWORD_RESULTS};

#[cfg(test)]
pub use provider::mock;
