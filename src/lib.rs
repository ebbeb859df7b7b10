//! Creator Workflow
//!
//! Guided, multi-step content planning for video creators:
//! - A fixed catalog of prompt-template workflows
//! - Step-by-step execution against Gemini or OpenAI
//! - Keyword metric and web page enrichment of prompts
//! - An HTTP API and a command line runner over the same service

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{
    Credential, CredentialProvider, CredentialType, GenerationOptions, KeywordMetricsProvider,
    TextGenerationClient,
};
use infrastructure::{
    credentials::EnvCredentialProvider,
    keyword::{KeywordToolClient, KeywordToolConfig, SyntheticKeywordProvider},
    llm::{HttpClient, LlmProviderConfig, LlmProviderFactory},
    page::HtmlPageFetcher,
    services::WorkflowService,
    session::{InMemorySessionRepository, SessionStoreConfig},
};
use tracing::{info, warn};

/// Create the application state from the loaded configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = create_workflow_service(config, &EnvCredentialProvider::default()).await?;
    Ok(AppState::new(service))
}

/// Wire the workflow service from configuration
///
/// Keys set in configuration win over the environment. A missing generation
/// key is not fatal: sessions still work and steps fail with a
/// configuration error until a key is provided.
pub async fn create_workflow_service(
    config: &AppConfig,
    credentials: &dyn CredentialProvider,
) -> anyhow::Result<WorkflowService> {
    let generator = create_text_generator(config, credentials).await?;
    let keywords = create_keyword_provider(config, credentials).await?;
    let pages = HtmlPageFetcher::new(HttpClient::with_timeout(config.fetch.timeout())?);

    let sessions = InMemorySessionRepository::with_config(
        SessionStoreConfig::default()
            .with_max_capacity(config.server.max_sessions)
            .with_time_to_idle(config.server.session_idle()),
    );

    Ok(WorkflowService::new(
        Arc::new(sessions),
        Arc::new(generator),
        keywords,
        Arc::new(pages),
    ))
}

async fn create_text_generator(
    config: &AppConfig,
    credentials: &dyn CredentialProvider,
) -> anyhow::Result<TextGenerationClient> {
    let generation = &config.generation;
    let model = generation.model().to_string();
    let credential_type = generation.provider.credential_type();

    let Some(credential) =
        resolve_credential(generation.api_key.as_deref(), credential_type, credentials).await
    else {
        warn!(
            provider = %credential_type,
            "No text generation API key configured; steps will fail until one is set"
        );
        return Ok(TextGenerationClient::unconfigured(model));
    };

    let provider = LlmProviderFactory::create(
        &LlmProviderConfig {
            kind: generation.provider,
            base_url: generation.base_url.clone(),
            timeout: generation.timeout(),
        },
        &credential,
    )?;
    info!(provider = provider.provider_name(), model = %model, "Text generation configured");

    Ok(TextGenerationClient::new(provider, model).with_options(GenerationOptions {
        temperature: generation.temperature,
        max_tokens: generation.max_tokens,
    }))
}

async fn create_keyword_provider(
    config: &AppConfig,
    credentials: &dyn CredentialProvider,
) -> anyhow::Result<Arc<dyn KeywordMetricsProvider>> {
    let keywords = &config.keywords;

    match resolve_credential(
        keywords.api_key.as_deref(),
        CredentialType::KeywordTool,
        credentials,
    )
    .await
    {
        Some(credential) => {
            info!(country = %keywords.country, language = %keywords.language, "Using Keyword Tool API");
            let client = HttpClient::with_timeout(keywords.timeout())?;
            Ok(Arc::new(KeywordToolClient::new(
                client,
                credential.api_key(),
                KeywordToolConfig {
                    api_url: keywords.api_url.clone(),
                    country: keywords.country.clone(),
                    language: keywords.language.clone(),
                },
            )))
        }
        None => {
            info!("No keyword API key configured; using synthetic keyword metrics");
            Ok(Arc::new(SyntheticKeywordProvider))
        }
    }
}

async fn resolve_credential(
    configured: Option<&str>,
    credential_type: CredentialType,
    credentials: &dyn CredentialProvider,
) -> Option<Credential> {
    match configured.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => Some(Credential::new(credential_type, key)),
        None => credentials.get_credential(credential_type).await.ok(),
    }
}
