use async_trait::async_trait;
use std::time::Duration;

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, DomainError>;

    /// GET a URL and return the body as text
    async fn get_text(&self, url: &str) -> Result<String, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| {
                DomainError::service("http", format!("Request failed: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::service(
                "http",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        Ok(response)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.send(request.json(body))
            .await?
            .json()
            .await
            .map_err(|e| {
                DomainError::service(
                    "http",
                    format!("Failed to parse response: {}", e.without_url()),
                )
            })
    }

    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.get(url).query(query);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| {
                DomainError::service(
                    "http",
                    format!("Failed to parse response: {}", e.without_url()),
                )
            })
    }

    async fn get_text(&self, url: &str) -> Result<String, DomainError> {
        self.send(self.client.get(url))
            .await?
            .text()
            .await
            .map_err(|e| {
                DomainError::service("http", format!("Failed to read body: {}", e.without_url()))
            })
    }
}
