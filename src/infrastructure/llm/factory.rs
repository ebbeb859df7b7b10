use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::http_client::HttpClient;
use super::{GeminiProvider, OpenAiProvider};
use crate::domain::{Credential, CredentialType, DomainError, LlmProvider};

/// Which text generation backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderKind {
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl LlmProviderKind {
    /// Credential the provider authenticates with
    pub fn credential_type(self) -> CredentialType {
        match self {
            Self::Gemini => CredentialType::Gemini,
            Self::OpenAi => CredentialType::OpenAi,
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Default)]
pub struct LlmProviderConfig {
    pub kind: LlmProviderKind,
    /// Overrides the provider's public endpoint
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an LLM provider from configuration and credential
    pub fn create(
        config: &LlmProviderConfig,
        credential: &Credential,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        Self::validate_credential_type(credential, config.kind.credential_type())?;

        let http_client = match config.timeout {
            Some(timeout) => HttpClient::with_timeout(timeout)?,
            None => HttpClient::new(),
        };

        let provider: Arc<dyn LlmProvider> = match (config.kind, &config.base_url) {
            (LlmProviderKind::Gemini, Some(url)) => Arc::new(GeminiProvider::with_base_url(
                http_client,
                credential.api_key(),
                url,
            )),
            (LlmProviderKind::Gemini, None) => {
                Arc::new(GeminiProvider::new(http_client, credential.api_key()))
            }
            (LlmProviderKind::OpenAi, Some(url)) => Arc::new(OpenAiProvider::with_base_url(
                http_client,
                credential.api_key(),
                url,
            )),
            (LlmProviderKind::OpenAi, None) => {
                Arc::new(OpenAiProvider::new(http_client, credential.api_key()))
            }
        };

        Ok(provider)
    }

    /// Create a Gemini provider directly
    pub fn create_gemini(api_key: impl Into<String>) -> Arc<dyn LlmProvider> {
        Arc::new(GeminiProvider::new(HttpClient::new(), api_key))
    }

    /// Create an OpenAI provider directly
    pub fn create_openai(api_key: impl Into<String>) -> Arc<dyn LlmProvider> {
        Arc::new(OpenAiProvider::new(HttpClient::new(), api_key))
    }

    fn validate_credential_type(
        credential: &Credential,
        expected: CredentialType,
    ) -> Result<(), DomainError> {
        if credential.credential_type() != expected {
            return Err(DomainError::validation(format!(
                "Expected credential type {}, got {}",
                expected,
                credential.credential_type()
            )));
        }
        Ok(())
    }
}
