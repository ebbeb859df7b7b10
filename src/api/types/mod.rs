//! Request and response types for the HTTP API

pub mod error;
pub mod json;
pub mod workflow;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use workflow::{
    CreateSessionRequest, FetchPageRequest, KeywordQuery, KeywordsResponse, ListResponse,
    PromptPreviewResponse, RestartSessionRequest, UpdateInputsRequest,
};
