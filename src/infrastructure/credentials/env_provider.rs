use async_trait::async_trait;
use std::collections::HashMap;
use std::env;

use crate::domain::credentials::{Credential, CredentialProvider, CredentialType};
use crate::domain::DomainError;

/// Credential provider that reads API keys from environment variables
///
/// A variable that is set but blank counts as missing.
#[derive(Debug)]
pub struct EnvCredentialProvider {
    mappings: HashMap<CredentialType, String>,
}

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    pub fn with_mapping(mut self, credential_type: CredentialType, var: impl Into<String>) -> Self {
        self.mappings.insert(credential_type, var.into());
        self
    }

    pub fn with_defaults(self) -> Self {
        self.with_mapping(CredentialType::Gemini, "GEMINI_API_KEY")
            .with_mapping(CredentialType::OpenAi, "OPENAI_API_KEY")
            .with_mapping(CredentialType::KeywordTool, "KEYWORD_TOOL_API_KEY")
    }

    fn read_credential(&self, credential_type: CredentialType) -> Result<Credential, DomainError> {
        let var = self.mappings.get(&credential_type).ok_or_else(|| {
            DomainError::configuration_missing(format!(
                "No environment mapping configured for credential type: {}",
                credential_type
            ))
        })?;

        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => {
                Ok(Credential::new(credential_type, value.trim()))
            }
            _ => Err(DomainError::configuration_missing(format!(
                "Environment variable '{}' not set for credential type: {}",
                var, credential_type
            ))),
        }
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new().with_defaults()
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn get_credential(&self, credential_type: CredentialType) -> Result<Credential, DomainError> {
        self.read_credential(credential_type)
    }

    async fn supports(&self, credential_type: CredentialType) -> bool {
        self.read_credential(credential_type).is_ok()
    }

    fn provider_name(&self) -> &'static str {
        "env"
    }
}
