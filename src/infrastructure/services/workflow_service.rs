//! Workflow service - session lifecycle and step execution

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::keyword::{KeywordMetric, KeywordMetricsProvider};
use crate::domain::llm::TextGenerator;
use crate::domain::page::{PageContent, PageFetcher};
use crate::domain::session::{Session, SessionId, SessionRepository};
use crate::domain::workflow::{
    catalog, export_file_name, export_text, HistoryEntry, PromptPreview, SessionSnapshot,
    StepOutcome, StepServices, WorkflowDefinition, WorkflowError, WorkflowKind,
};
use crate::domain::DomainError;

/// Session state returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

/// A rendered export ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct WorkflowService {
    sessions: Arc<dyn SessionRepository>,
    generator: Arc<dyn TextGenerator>,
    keywords: Arc<dyn KeywordMetricsProvider>,
    pages: Arc<dyn PageFetcher>,
}

impl WorkflowService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        generator: Arc<dyn TextGenerator>,
        keywords: Arc<dyn KeywordMetricsProvider>,
        pages: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            sessions,
            generator,
            keywords,
            pages,
        }
    }

    /// Services handed to a [`StepRunner`](crate::domain::workflow::StepRunner)
    pub fn step_services(&self) -> StepServices<'_> {
        StepServices {
            generator: self.generator.as_ref(),
            keywords: self.keywords.as_ref(),
            pages: self.pages.as_ref(),
        }
    }

    pub fn generation_configured(&self) -> bool {
        self.generator.is_configured()
    }

    pub fn keyword_provider_name(&self) -> &'static str {
        self.keywords.provider_name()
    }

    pub fn list_workflows(&self) -> Vec<&'static WorkflowDefinition> {
        catalog::list()
    }

    pub fn get_workflow(&self, id: &str) -> Result<&'static WorkflowDefinition, WorkflowError> {
        catalog::get(id)
    }

    /// Start a session for `workflow_id`, optionally seeded with form inputs
    #[instrument(skip(self, inputs))]
    pub async fn create_session<I>(
        &self,
        workflow_id: &str,
        inputs: I,
    ) -> Result<SessionView, WorkflowError>
    where
        I: IntoIterator<Item = (String, String)> + Send,
    {
        let kind: WorkflowKind = workflow_id.parse()?;
        let session = Session::new(kind);
        session.runner().await.set_inputs(inputs)?;

        let session = self.sessions.insert(session).await?;
        info!(session_id = %session.id(), workflow = %kind, "Session created");

        Ok(view(&session).await)
    }

    pub async fn get_session(&self, id: &str) -> Result<SessionView, WorkflowError> {
        let session = self.find(id).await?;
        Ok(view(&session).await)
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), WorkflowError> {
        let session_id = parse_id(id)?;
        if !self.sessions.remove(&session_id).await? {
            return Err(WorkflowError::session_not_found(id));
        }
        info!(session_id = %session_id, "Session deleted");
        Ok(())
    }

    pub async fn list_sessions(&self) -> Result<Vec<SessionView>, WorkflowError> {
        let sessions = self.sessions.list().await?;
        let mut views = Vec::with_capacity(sessions.len());
        for session in &sessions {
            views.push(view(session).await);
        }
        Ok(views)
    }

    pub async fn set_inputs<I>(&self, id: &str, inputs: I) -> Result<SessionView, WorkflowError>
    where
        I: IntoIterator<Item = (String, String)> + Send,
    {
        let session = self.find(id).await?;
        session.runner().await.set_inputs(inputs)?;
        Ok(view(&session).await)
    }

    /// Generate the current step of a session
    ///
    /// The session stays locked for the duration of the generation call.
    #[instrument(skip(self))]
    pub async fn run_step(&self, id: &str) -> Result<StepOutcome, WorkflowError> {
        let session = self.find(id).await?;
        let mut runner = session.runner().await;
        runner.run_step(self.step_services()).await
    }

    pub async fn advance(&self, id: &str) -> Result<SessionView, WorkflowError> {
        let session = self.find(id).await?;
        session.runner().await.advance()?;
        Ok(view(&session).await)
    }

    pub async fn retreat(&self, id: &str) -> Result<SessionView, WorkflowError> {
        let session = self.find(id).await?;
        session.runner().await.retreat();
        Ok(view(&session).await)
    }

    pub async fn reset(&self, id: &str) -> Result<SessionView, WorkflowError> {
        let session = self.find(id).await?;
        session.runner().await.reset();
        Ok(view(&session).await)
    }

    /// Switch a session to another workflow, clearing its context
    pub async fn restart(&self, id: &str, workflow_id: &str) -> Result<SessionView, WorkflowError> {
        let kind: WorkflowKind = workflow_id.parse()?;
        let session = self.find(id).await?;
        session.runner().await.start(kind);
        Ok(view(&session).await)
    }

    pub async fn preview_prompt(&self, id: &str) -> Result<PromptPreview, WorkflowError> {
        let session = self.find(id).await?;
        let runner = session.runner().await;
        runner.preview_prompt()
    }

    pub async fn history(&self, id: &str) -> Result<Vec<HistoryEntry>, WorkflowError> {
        let session = self.find(id).await?;
        let runner = session.runner().await;
        Ok(runner.history().to_vec())
    }

    /// Merge the data saved with history entry `index` into the session
    pub async fn reuse_history(&self, id: &str, index: usize) -> Result<SessionView, WorkflowError> {
        let session = self.find(id).await?;
        session.runner().await.reuse_history(index)?;
        Ok(view(&session).await)
    }

    /// Merge history entry `index` and restart its workflow from the first step
    pub async fn continue_from_history(
        &self,
        id: &str,
        index: usize,
    ) -> Result<SessionView, WorkflowError> {
        let session = self.find(id).await?;
        session.runner().await.continue_from_history(index)?;
        Ok(view(&session).await)
    }

    pub async fn export(&self, id: &str) -> Result<ExportDocument, WorkflowError> {
        let session = self.find(id).await?;
        let runner = session.runner().await;
        let now = Utc::now();
        let definition = runner.definition();

        Ok(ExportDocument {
            file_name: export_file_name(definition.id, now),
            content: export_text(definition, runner.context(), now),
        })
    }

    #[instrument(skip(self))]
    pub async fn keyword_metrics(&self, seed: &str) -> Result<Vec<KeywordMetric>, WorkflowError> {
        let seed = seed.trim();
        if seed.is_empty() {
            return Err(WorkflowError::validation("Keyword seed must not be empty"));
        }
        Ok(self.keywords.lookup(seed).await?)
    }

    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<PageContent, WorkflowError> {
        self.pages.fetch(url).await.map_err(|e| match e {
            DomainError::Validation { message } => WorkflowError::Validation(message),
            other => other.into(),
        })
    }

    async fn find(&self, id: &str) -> Result<Arc<Session>, WorkflowError> {
        let session_id = parse_id(id)?;
        self.sessions
            .get(&session_id)
            .await?
            .ok_or_else(|| WorkflowError::session_not_found(id))
    }
}

fn parse_id(id: &str) -> Result<SessionId, WorkflowError> {
    SessionId::parse(id).map_err(|_| WorkflowError::session_not_found(id))
}

async fn view(session: &Session) -> SessionView {
    SessionView {
        id: session.id(),
        created_at: session.created_at(),
        snapshot: session.runner().await.snapshot(),
    }
}
