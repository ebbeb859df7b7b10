use serde::{Deserialize, Serialize};

/// Which external service a credential belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    Gemini,
    OpenAi,
    KeywordTool,
}

/// An API key for one external service
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    credential_type: CredentialType,
    api_key: String,
}

impl Credential {
    pub fn new(credential_type: CredentialType, api_key: impl Into<String>) -> Self {
        Self {
            credential_type,
            api_key: api_key.into(),
        }
    }

    pub fn credential_type(&self) -> CredentialType {
        self.credential_type
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("credential_type", &self.credential_type)
            .field("api_key", &"***")
            .finish()
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialType::Gemini => write!(f, "gemini"),
            CredentialType::OpenAi => write!(f, "openai"),
            CredentialType::KeywordTool => write!(f, "keyword_tool"),
        }
    }
}
