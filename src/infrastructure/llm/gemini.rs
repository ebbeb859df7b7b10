use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use super::openai::rename_service;
use crate::domain::{
    DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage,
};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used when none is configured
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Google Generative Language (`generateContent`) provider
#[derive(Debug)]
pub struct GeminiProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> GeminiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_request(&self, request: &LlmRequest) -> GeminiRequest {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in &request.messages {
            let part = GeminiPart {
                text: message.content_text().to_string(),
            };
            match message.role {
                MessageRole::System => system_parts.push(part),
                MessageRole::User => contents.push(GeminiContent {
                    role: Some("user".to_string()),
                    parts: vec![part],
                }),
                MessageRole::Assistant => contents.push(GeminiContent {
                    role: Some("model".to_string()),
                    parts: vec![part],
                }),
            }
        }

        let generation_config = (request.temperature.is_some() || request.max_tokens.is_some())
            .then(|| GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            });

        GeminiRequest {
            contents,
            system_instruction: (!system_parts.is_empty()).then(|| GeminiContent {
                role: None,
                parts: system_parts,
            }),
            generation_config,
        }
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-goog-api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, model: &str, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: GeminiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::service("gemini", format!("Failed to parse response: {}", e))
        })?;

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!("prompt blocked: {}", r))
                .unwrap_or_else(|| "No candidates in response".to_string());
            DomainError::service("gemini", reason)
        })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        let mut llm_response = LlmResponse::new(
            response.response_id.unwrap_or_default(),
            response.model_version.unwrap_or_else(|| model.to_string()),
            Message::assistant(text),
        );

        if let Some(reason) = candidate.finish_reason {
            llm_response = llm_response.with_finish_reason(parse_finish_reason(&reason));
        }

        if let Some(usage) = response.usage_metadata {
            llm_response = llm_response.with_usage(Usage::new(
                usage.prompt_token_count,
                usage.candidates_token_count,
            ));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for GeminiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.generate_url(model);
        let body = serde_json::to_value(self.build_request(&request))
            .map_err(|e| DomainError::internal(format!("Failed to encode request: {}", e)))?;

        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| rename_service(e, "gemini"))?;

        self.parse_response(model, response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "MAX_TOKENS" => FinishReason::Length,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => {
            FinishReason::ContentFilter
        }
        "STOP" => FinishReason::Stop,
        _ => FinishReason::Error,
    }
}

// Generative Language API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    model_version: Option<String>,
    response_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const TEST_URL: &str =
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent";

    fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 30,
                "totalTokenCount": 42
            },
            "modelVersion": "gemini-2.0-flash-exp",
            "responseId": "resp-1"
        })
    }

    #[tokio::test]
    async fn test_gemini_chat() {
        let client = MockHttpClient::new().with_response(TEST_URL, text_response("Three concepts"));
        let provider = GeminiProvider::new(client, "gm-key");

        let request = LlmRequest::builder().user("Suggest concepts").build();
        let response = provider.chat(DEFAULT_GEMINI_MODEL, request).await.unwrap();

        assert_eq!(response.content(), "Three concepts");
        assert_eq!(response.id, "resp-1");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage, Some(Usage::new(12, 30)));

        let sent = &provider.client.requests()[0];
        assert_eq!(sent.header("x-goog-api-key"), Some("gm-key"));
        let body = sent.body.as_ref().unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Suggest concepts");
        assert!(body.get("generationConfig").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[tokio::test]
    async fn test_gemini_request_mapping() {
        let client = MockHttpClient::new().with_response(TEST_URL, text_response("ok"));
        let provider = GeminiProvider::new(client, "gm-key");

        let request = LlmRequest::builder()
            .system("You are a YouTube strategist")
            .user("Plan")
            .max_tokens(256)
            .build();
        provider.chat(DEFAULT_GEMINI_MODEL, request).await.unwrap();

        let body = provider.client.requests()[0].body.clone().unwrap();
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are a YouTube strategist"
        );
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
        assert!(body["generationConfig"].get("temperature").is_none());
    }

    #[tokio::test]
    async fn test_gemini_joins_multiple_parts() {
        let response = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] },
                "finishReason": "MAX_TOKENS"
            }]
        });
        let client = MockHttpClient::new().with_response(TEST_URL, response);
        let provider = GeminiProvider::new(client, "gm-key");

        let request = LlmRequest::builder().user("hi").build();
        let response = provider.chat(DEFAULT_GEMINI_MODEL, request).await.unwrap();

        assert_eq!(response.content(), "Hello, world");
        assert_eq!(response.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(response.finish_reason, Some(FinishReason::Length));
    }

    #[tokio::test]
    async fn test_gemini_blocked_prompt() {
        let response = serde_json::json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        });
        let client = MockHttpClient::new().with_response(TEST_URL, response);
        let provider = GeminiProvider::new(client, "gm-key");

        let request = LlmRequest::builder().user("hi").build();
        let err = provider.chat(DEFAULT_GEMINI_MODEL, request).await.unwrap_err();

        assert_eq!(err, DomainError::service("gemini", "prompt blocked: SAFETY"));
    }

    #[tokio::test]
    async fn test_gemini_transport_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "HTTP 429: quota exceeded");
        let provider = GeminiProvider::new(client, "gm-key");

        let request = LlmRequest::builder().user("hi").build();
        let err = provider.chat(DEFAULT_GEMINI_MODEL, request).await.unwrap_err();

        assert_eq!(err, DomainError::service("gemini", "HTTP 429: quota exceeded"));
    }
}
