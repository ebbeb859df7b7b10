//! LLM provider implementations

mod factory;
mod gemini;
mod http_client;
mod openai;

pub use factory::{LlmProviderConfig, LlmProviderFactory, LlmProviderKind};
pub use gemini::{GeminiProvider, DEFAULT_GEMINI_MODEL};
pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::OpenAiProvider;

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
