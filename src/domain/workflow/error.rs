//! Workflow error types

use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur while running a workflow session
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowError {
    #[error("Workflow not found: {0}")]
    NotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Missing required inputs for step '{step}': {}", .fields.join(", "))]
    MissingInputs { step: String, fields: Vec<String> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Step '{step}' has no result yet")]
    StepNotReady { step: String },

    #[error("Workflow '{0}' is already completed")]
    Completed(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WorkflowError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn session_not_found(id: impl Into<String>) -> Self {
        Self::SessionNotFound(id.into())
    }

    pub fn missing_inputs(step: impl Into<String>, fields: Vec<String>) -> Self {
        Self::MissingInputs {
            step: step.into(),
            fields,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn step_not_ready(step: impl Into<String>) -> Self {
        Self::StepNotReady { step: step.into() }
    }

    pub fn completed(id: impl Into<String>) -> Self {
        Self::Completed(id.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// Whether calling the same operation again may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}

impl From<DomainError> for WorkflowError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::NotFound(message),
            DomainError::Validation { message } => Self::Validation(message),
            DomainError::ConfigurationMissing { message } => Self::ConfigurationMissing(message),
            DomainError::Service { service, message } => {
                Self::Service(format!("{}: {}", service, message))
            }
            DomainError::Internal { message } => Self::Internal(message),
        }
    }
}
