//! Session repository trait

use std::sync::Arc;

use async_trait::async_trait;

use super::entity::{Session, SessionId};
use crate::domain::DomainError;

/// Store of live sessions
#[async_trait]
pub trait SessionRepository: Send + Sync + std::fmt::Debug {
    /// Insert a new session, returning the shared handle
    async fn insert(&self, session: Session) -> Result<Arc<Session>, DomainError>;

    async fn get(&self, id: &SessionId) -> Result<Option<Arc<Session>>, DomainError>;

    /// Remove a session; returns whether it existed
    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// All sessions in insertion order
    async fn list(&self) -> Result<Vec<Arc<Session>>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
