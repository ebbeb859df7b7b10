//! Prompt-in, text-out generation over an optional provider

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{LlmProvider, LlmRequest};
use crate::domain::DomainError;

/// Generates text for a rendered prompt
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// Whether a backing provider is available
    fn is_configured(&self) -> bool {
        true
    }
}

/// Generation parameters applied to every call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// [`TextGenerator`] backed by an [`LlmProvider`]
///
/// Without a provider every call fails with `ConfigurationMissing`, so the
/// rest of the application can start and render prompts without credentials.
#[derive(Debug, Clone)]
pub struct TextGenerationClient {
    provider: Option<Arc<dyn LlmProvider>>,
    model: String,
    options: GenerationOptions,
}

impl TextGenerationClient {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider: Some(provider),
            model: model.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn unconfigured(model: impl Into<String>) -> Self {
        Self {
            provider: None,
            model: model.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for TextGenerationClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            DomainError::configuration_missing(
                "No text generation provider is configured; set GEMINI_API_KEY or OPENAI_API_KEY",
            )
        })?;

        let request = LlmRequest::builder()
            .user(prompt)
            .options(self.options.temperature, self.options.max_tokens)
            .build();

        let response = provider.chat(&self.model, request).await?;
        let text = response.content();

        debug!(
            provider = provider.provider_name(),
            response_len = text.len(),
            "Generated text"
        );
        Ok(text.to_string())
    }

    fn is_configured(&self) -> bool {
        self.provider.is_some()
    }
}
