use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::llm::{LlmProviderKind, DEFAULT_GEMINI_MODEL};

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub generation: GenerationConfig,
    pub keywords: KeywordsConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on live sessions; the least recently used is evicted beyond it
    pub max_sessions: u64,
    /// Sessions untouched for this long are dropped
    pub session_idle_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Text generation settings
///
/// An empty `api_key` falls back to the provider's environment variable
/// (`GEMINI_API_KEY` or `OPENAI_API_KEY`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub provider: LlmProviderKind,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Request timeout; generation calls wait indefinitely when unset
    pub timeout_secs: Option<u64>,
}

/// Keyword metrics settings; without an API key synthetic data is used
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeywordsConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub country: String,
    pub language: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_sessions: 1000,
            session_idle_secs: 3600,
        }
    }
}

impl ServerConfig {
    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::default(),
            model: None,
            api_key: None,
            base_url: None,
            temperature: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }
}

impl GenerationConfig {
    /// Configured model, or the provider's default
    pub fn model(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) if !model.trim().is_empty() => model,
            (_, LlmProviderKind::Gemini) => DEFAULT_GEMINI_MODEL,
            (_, LlmProviderKind::OpenAi) => DEFAULT_OPENAI_MODEL,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.keywordtool.io/v2/search/suggestions/youtube".to_string(),
            country: "jp".to_string(),
            language: "ja".to_string(),
            timeout_secs: 30,
        }
    }
}

impl KeywordsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert_eq!(config.generation.provider, LlmProviderKind::Gemini);
        assert_eq!(config.generation.model(), "gemini-2.0-flash-exp");
        assert_eq!(config.fetch.timeout(), Duration::from_secs(10));
        assert_eq!(config.keywords.country, "jp");
        assert_eq!(config.server.max_sessions, 1000);
        assert_eq!(config.server.session_idle(), Duration::from_secs(3600));
        assert_eq!(config.generation.timeout(), None);
    }

    #[test]
    fn test_model_defaults_follow_provider() {
        let mut generation = GenerationConfig {
            provider: LlmProviderKind::OpenAi,
            ..Default::default()
        };
        assert_eq!(generation.model(), "gpt-4o-mini");

        generation.model = Some("  ".to_string());
        assert_eq!(generation.model(), "gpt-4o-mini");

        generation.model = Some("gpt-4o".to_string());
        assert_eq!(generation.model(), "gpt-4o");
    }

    #[test]
    fn test_session_and_timeout_overrides() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"{"server": {"max_sessions": 5, "session_idle_secs": 60}, "generation": {"timeout_secs": 90}}"#,
                config::FileFormat::Json,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.max_sessions, 5);
        assert_eq!(config.server.session_idle(), Duration::from_secs(60));
        assert_eq!(config.generation.timeout(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_partial_sections_deserialize() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"{"server": {"port": 9000}, "generation": {"provider": "openai"}, "logging": {"format": "json"}}"#,
                config::FileFormat::Json,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.generation.provider, LlmProviderKind::OpenAi);
        assert_eq!(config.generation.timeout(), None);
        assert_eq!(config.server.session_idle_secs, 3600);
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
