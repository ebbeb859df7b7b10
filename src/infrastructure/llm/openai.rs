use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::{
    DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage,
};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI chat completions provider
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<OpenAiMessage> =
            request.messages.iter().map(OpenAiMessage::from_domain).collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::service("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::service("openai", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut llm_response = LlmResponse::new(response.id, response.model, message);

        if let Some(reason) = choice.finish_reason {
            llm_response = llm_response.with_finish_reason(parse_finish_reason(&reason));
        }

        if let Some(usage) = response.usage {
            llm_response = llm_response.with_usage(Usage::new(
                usage.prompt_tokens,
                usage.completion_tokens,
            ));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);
        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| rename_service(e, "openai"))?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Attribute transport errors to the calling provider
pub(super) fn rename_service(err: DomainError, provider: &str) -> DomainError {
    match err {
        DomainError::Service { message, .. } => DomainError::service(provider, message),
        other => other,
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl OpenAiMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role: role.to_string(),
            content: message.content_text().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    id: String,
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    #[tokio::test]
    async fn test_openai_chat() {
        let mock_response = serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Hello! How can I help you?"
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 8,
                "total_tokens": 18
            }
        });

        let client = MockHttpClient::new().with_response(TEST_URL, mock_response);

        let provider = OpenAiProvider::new(client, "test-api-key");

        let request = LlmRequest::builder().user("Hello!").build();

        let response = provider.chat("gpt-4", request).await.unwrap();

        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.model, "gpt-4");
        assert_eq!(response.content(), "Hello! How can I help you?");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));

        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 10);
        assert_eq!(usage.completion_tokens, 8);
    }

    #[tokio::test]
    async fn test_openai_error_handling() {
        let client = MockHttpClient::new().with_error(TEST_URL, "API key invalid");

        let provider = OpenAiProvider::new(client, "invalid-key");

        let request = LlmRequest::builder().user("Hello!").build();

        let err = provider.chat("gpt-4", request).await.unwrap_err();
        assert_eq!(err, DomainError::service("openai", "API key invalid"));
    }

    #[tokio::test]
    async fn test_openai_custom_base_url() {
        let custom_url = "http://localhost:8080/v1/chat/completions";
        let mock_response = serde_json::json!({
            "id": "chatcmpl-custom",
            "model": "gpt-4",
            "choices": [{
                "message": { "role": "assistant", "content": "Custom response" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7 }
        });

        let client = MockHttpClient::new().with_response(custom_url, mock_response);
        let provider = OpenAiProvider::with_base_url(client, "test-key", "http://localhost:8080");

        let request = LlmRequest::builder().user("Test").build();
        let response = provider.chat("gpt-4", request).await.unwrap();

        assert_eq!(response.id, "chatcmpl-custom");
    }

    #[tokio::test]
    async fn test_openai_request_body() {
        let mock_response = serde_json::json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o",
            "choices": [{ "message": { "content": "ok" }, "finish_reason": "length" }]
        });
        let client = MockHttpClient::new().with_response(TEST_URL, mock_response);
        let provider = OpenAiProvider::new(client, "sk-test");

        let request = LlmRequest::builder()
            .system("Be brief")
            .user("Plan a video")
            .temperature(0.5)
            .build();
        let response = provider.chat("gpt-4o", request).await.unwrap();
        assert_eq!(response.finish_reason, Some(FinishReason::Length));

        let sent = &provider.client.requests()[0];
        assert_eq!(sent.header("authorization"), Some("Bearer sk-test"));
        let body = sent.body.as_ref().unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Plan a video");
        assert_eq!(body["temperature"], 0.5);
        assert!(body.get("max_tokens").is_none());
    }
}
