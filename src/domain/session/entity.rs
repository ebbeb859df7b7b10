//! Session entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::workflow::{StepRunner, WorkflowKind};
use crate::domain::DomainError;

/// Session identifier (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| DomainError::validation(format!("Invalid session id '{}'", value)))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One client's workflow run
///
/// The runner sits behind an async mutex: a step holds the lock for the whole
/// generation call, so operations on the same session are serialized while
/// different sessions proceed independently.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    created_at: DateTime<Utc>,
    runner: Mutex<StepRunner>,
}

impl Session {
    pub fn new(kind: WorkflowKind) -> Self {
        Self {
            id: SessionId::new(),
            created_at: Utc::now(),
            runner: Mutex::new(StepRunner::new(kind)),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub async fn runner(&self) -> MutexGuard<'_, StepRunner> {
        self.runner.lock().await
    }
}
