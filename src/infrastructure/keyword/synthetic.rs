use async_trait::async_trait;
use tracing::debug;

use crate::domain::keyword::{synthetic_metrics, KeywordMetric, KeywordMetricsProvider};
use crate::domain::DomainError;

/// Offline provider used when no keyword service credential is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticKeywordProvider;

#[async_trait]
impl KeywordMetricsProvider for SyntheticKeywordProvider {
    async fn lookup(&self, seed: &str) -> Result<Vec<KeywordMetric>, DomainError> {
        debug!(seed = %seed, "Generating synthetic keyword metrics");
        Ok(synthetic_metrics(seed.trim()))
    }

    fn provider_name(&self) -> &'static str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_is_deterministic() {
        let provider = SyntheticKeywordProvider;
        let first = provider.lookup(" cooking ").await.unwrap();
        let second = provider.lookup("cooking").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
        assert_eq!(first[2].keyword, "cooking for beginners");
    }
}
