//! Domain layer - Core business logic and entities

pub mod credentials;
pub mod error;
pub mod keyword;
pub mod llm;
pub mod page;
pub mod prompt;
pub mod session;
pub mod workflow;

pub use credentials::{Credential, CredentialProvider, CredentialType};
pub use error::DomainError;
pub use keyword::{KeywordMetric, KeywordMetricsProvider};
pub use llm::{
    FinishReason, GenerationOptions, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse,
    Message, MessageRole, TextGenerationClient, TextGenerator, Usage,
};
pub use page::{PageContent, PageFetcher};
pub use prompt::{fill_template, PromptTemplate};
pub use session::{Session, SessionId, SessionRepository};
pub use workflow::{
    ExecutionContext, RunnerPosition, SessionSnapshot, StepOutcome, StepRunner, StepServices,
    WorkflowDefinition, WorkflowError, WorkflowKind,
};
