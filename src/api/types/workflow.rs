//! Workflow session request and response types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::KeywordMetric;

/// Generic list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub object: String,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            object: "list".to_string(),
            data,
        }
    }
}

/// POST /v1/sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub workflow_id: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

/// PUT /v1/sessions/{id}/inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInputsRequest {
    pub inputs: BTreeMap<String, String>,
}

/// POST /v1/sessions/{id}/restart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestartSessionRequest {
    pub workflow_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptPreviewResponse {
    pub prompt: String,
    /// Placeholders rendered as "not provided" markers
    pub unresolved: Vec<String>,
}

/// GET /v1/keywords?seed=...
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordQuery {
    #[serde(default)]
    pub seed: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordsResponse {
    pub seed: String,
    pub provider: &'static str,
    pub keywords: Vec<KeywordMetric>,
    /// The same rows rendered the way they are inserted into prompts
    pub table: String,
}

/// POST /v1/pages/fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchPageRequest {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_inputs_default_to_empty() {
        let request: CreateSessionRequest =
            serde_json::from_str(r#"{"workflow_id": "content_scoring"}"#).unwrap();
        assert_eq!(request.workflow_id, "content_scoring");
        assert!(request.inputs.is_empty());
    }

    #[test]
    fn test_list_response_format() {
        let json = serde_json::to_value(ListResponse::new(vec![1, 2])).unwrap();
        assert_eq!(json["object"], "list");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
