use async_trait::async_trait;
use std::fmt::Debug;

use super::KeywordMetric;
use crate::domain::DomainError;

/// Upper bound on keywords returned by a single lookup
pub const MAX_KEYWORD_RESULTS: usize = 30;

/// Source of keyword search metrics
#[async_trait]
pub trait KeywordMetricsProvider: Send + Sync + Debug {
    /// Related keywords and their metrics for `seed`, at most [`MAX_KEYWORD_RESULTS`]
    async fn lookup(&self, seed: &str) -> Result<Vec<KeywordMetric>, DomainError>;

    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    pub struct MockKeywordProvider {
        metrics: Vec<KeywordMetric>,
        error: Option<String>,
        seeds: Mutex<Vec<String>>,
    }

    impl MockKeywordProvider {
        pub fn new(metrics: Vec<KeywordMetric>) -> Self {
            Self {
                metrics,
                ..Default::default()
            }
        }

        pub fn failing(error: impl Into<String>) -> Self {
            Self {
                error: Some(error.into()),
                ..Default::default()
            }
        }

        pub fn seeds(&self) -> Vec<String> {
            self.seeds.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KeywordMetricsProvider for MockKeywordProvider {
        async fn lookup(&self, seed: &str) -> Result<Vec<KeywordMetric>, DomainError> {
            self.seeds.lock().unwrap().push(seed.to_string());
            match &self.error {
                Some(error) => Err(DomainError::service("keywords", error)),
                None => Ok(self.metrics.clone()),
            }
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
