//! In-memory session repository using moka

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use moka::policy::EvictionPolicy;

use crate::domain::session::{Session, SessionId, SessionRepository};
use crate::domain::DomainError;

/// Configuration for the in-memory session store
#[derive(Debug, Clone)]
pub struct SessionStoreConfig {
    /// Maximum number of live sessions
    pub max_capacity: u64,
    /// Sessions not accessed for this duration are evicted
    pub time_to_idle: Duration,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1000,
            time_to_idle: Duration::from_secs(3600),
        }
    }
}

impl SessionStoreConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_time_to_idle(mut self, tti: Duration) -> Self {
        self.time_to_idle = tti;
        self
    }
}

/// Process-local session store
///
/// Idle sessions expire, and once the store is full the least recently
/// used session makes room for a new one.
#[derive(Debug)]
pub struct InMemorySessionRepository {
    sessions: MokaCache<SessionId, (u64, Arc<Session>)>,
    next_seq: AtomicU64,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::with_config(SessionStoreConfig::default())
    }

    pub fn with_config(config: SessionStoreConfig) -> Self {
        // a newly inserted session is always admitted
        let sessions = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_idle(config.time_to_idle)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            sessions,
            next_seq: AtomicU64::new(0),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: Session) -> Result<Arc<Session>, DomainError> {
        let session = Arc::new(session);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.sessions
            .insert(session.id(), (seq, session.clone()))
            .await;
        Ok(session)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<Arc<Session>>, DomainError> {
        Ok(self.sessions.get(id).await.map(|(_, session)| session))
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.remove(id).await.is_some())
    }

    async fn list(&self) -> Result<Vec<Arc<Session>>, DomainError> {
        let mut entries: Vec<_> = self.sessions.iter().map(|(_, entry)| entry).collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, session)| session).collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.sessions.run_pending_tasks().await;
        Ok(self.sessions.entry_count() as usize)
    }
}
