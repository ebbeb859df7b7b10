//! Keyword Tool (keywordtool.io) YouTube suggestion client

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::keyword::{KeywordMetric, KeywordMetricsProvider, MAX_KEYWORD_RESULTS};
use crate::domain::DomainError;
use crate::infrastructure::llm::HttpClientTrait;

const DEFAULT_KEYWORD_TOOL_URL: &str = "https://api.keywordtool.io/v2/search/suggestions/youtube";

#[derive(Debug, Clone)]
pub struct KeywordToolConfig {
    pub api_url: String,
    pub country: String,
    pub language: String,
}

impl Default for KeywordToolConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_KEYWORD_TOOL_URL.to_string(),
            country: "jp".to_string(),
            language: "ja".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct KeywordToolClient<C: HttpClientTrait> {
    client: C,
    api_key: String,
    config: KeywordToolConfig,
}

impl<C: HttpClientTrait> KeywordToolClient<C> {
    pub fn new(client: C, api_key: impl Into<String>, config: KeywordToolConfig) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            config,
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> KeywordMetricsProvider for KeywordToolClient<C> {
    #[instrument(skip(self), fields(country = %self.config.country))]
    async fn lookup(&self, seed: &str) -> Result<Vec<KeywordMetric>, DomainError> {
        let query = [
            ("apikey", self.api_key.as_str()),
            ("keyword", seed.trim()),
            ("country", self.config.country.as_str()),
            ("language", self.config.language.as_str()),
            ("metrics", "true"),
            ("output", "json"),
        ];

        let response = self
            .client
            .get_json(&self.config.api_url, vec![], &query)
            .await
            .map_err(|e| match e {
                DomainError::Service { message, .. } => DomainError::service("keyword_tool", message),
                other => other,
            })?;

        let metrics = parse_results(&response)?;
        debug!(count = metrics.len(), "Fetched keyword metrics");
        Ok(metrics)
    }

    fn provider_name(&self) -> &'static str {
        "keyword_tool"
    }
}

/// `results` is either a flat list or an object of keyword groups
fn parse_results(response: &Value) -> Result<Vec<KeywordMetric>, DomainError> {
    let items: Vec<&Value> = match response.get("results") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(groups)) => groups
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(DomainError::service(
                "keyword_tool",
                "Unexpected 'results' format in response",
            ))
        }
    };

    Ok(items
        .into_iter()
        .filter_map(parse_item)
        .take(MAX_KEYWORD_RESULTS)
        .collect())
}

fn parse_item(item: &Value) -> Option<KeywordMetric> {
    let keyword = ["string", "keyword"]
        .iter()
        .find_map(|k| item.get(*k).and_then(Value::as_str))?;

    let volume = number_field(item, &["volume", "search_volume"]).unwrap_or(0.0);
    let competition = number_field(item, &["cmp", "competition"]).unwrap_or(0.0);
    let cpc = number_field(item, &["cpc"]).unwrap_or(0.0);

    Some(KeywordMetric::new(
        keyword,
        volume.max(0.0).round() as u64,
        competition,
        cpc,
    ))
}

/// First of `keys` holding a number or a numeric string
fn number_field(item: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match item.get(*k)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
