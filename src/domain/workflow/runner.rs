//! Step runner: drives one workflow one step at a time
//!
//! The runner owns the execution context and the current position. Every
//! mutating operation either succeeds completely or leaves the runner as it
//! was, so a failed generation can simply be retried.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::catalog::WorkflowKind;
use super::context::ExecutionContext;
use super::entity::{Enrichment, StepDefinition, WorkflowDefinition};
use super::error::WorkflowError;
use crate::domain::keyword::{
    render_table, seed_keywords, KeywordMetricsProvider, MAX_KEYWORD_RESULTS,
};
use crate::domain::llm::TextGenerator;
use crate::domain::page::{extract_urls, summarize, PageFetcher};

/// External services a step may call
#[derive(Clone, Copy)]
pub struct StepServices<'a> {
    pub generator: &'a dyn TextGenerator,
    pub keywords: &'a dyn KeywordMetricsProvider,
    pub pages: &'a dyn PageFetcher,
}

/// Where the runner currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum RunnerPosition {
    Step(usize),
    Completed,
}

/// One successfully generated step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub workflow_id: String,
    pub step_index: usize,
    pub step_title: String,
    pub result_key: String,
    /// The context as committed by this step
    pub data: ExecutionContext,
}

/// Result of a successful `run_step`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step_index: usize,
    pub step_title: String,
    pub result_key: String,
    pub content: String,
}

/// The current step's prompt rendered without enrichments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPreview {
    pub prompt: String,
    /// Placeholders with no value in the context, rendered as markers
    pub unresolved: Vec<String>,
}

/// Serializable view of a runner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub workflow_id: &'static str,
    pub workflow_name: &'static str,
    pub position: RunnerPosition,
    pub step_count: usize,
    pub current_step: Option<&'static str>,
    pub completed: bool,
    /// Whether the current step has a stored result
    pub step_ready: bool,
    pub context: ExecutionContext,
}

#[derive(Debug, Clone)]
pub struct StepRunner {
    kind: WorkflowKind,
    position: RunnerPosition,
    context: ExecutionContext,
    history: Vec<HistoryEntry>,
}

impl StepRunner {
    pub fn new(kind: WorkflowKind) -> Self {
        Self {
            kind,
            position: RunnerPosition::Step(0),
            context: ExecutionContext::new(),
            history: Vec::new(),
        }
    }

    pub fn kind(&self) -> WorkflowKind {
        self.kind
    }

    pub fn definition(&self) -> &'static WorkflowDefinition {
        self.kind.definition()
    }

    pub fn position(&self) -> RunnerPosition {
        self.position
    }

    pub fn is_completed(&self) -> bool {
        self.position == RunnerPosition::Completed
    }

    pub fn current_step(&self) -> Option<&'static StepDefinition> {
        match self.position {
            RunnerPosition::Step(index) => self.definition().step(index),
            RunnerPosition::Completed => None,
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Write a form value into the context
    pub fn set_input(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), WorkflowError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(WorkflowError::validation("Input key must not be empty"));
        }
        self.context.insert(key, value);
        Ok(())
    }

    /// Write several form values; nothing is written if any key is invalid
    pub fn set_inputs<I, K, V>(&mut self, inputs: I) -> Result<(), WorkflowError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let inputs: Vec<(String, String)> = inputs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        if inputs.iter().any(|(k, _)| k.trim().is_empty()) {
            return Err(WorkflowError::validation("Input key must not be empty"));
        }

        self.context.extend(inputs);
        Ok(())
    }

    /// Switch to another workflow, starting from an empty context
    pub fn start(&mut self, kind: WorkflowKind) {
        info!(workflow = %kind, "Starting workflow");
        self.kind = kind;
        self.reset();
    }

    /// Clear the context and return to the first step
    pub fn reset(&mut self) {
        self.context.clear();
        self.position = RunnerPosition::Step(0);
    }

    /// Required keys of the current step that have no value yet
    pub fn missing_inputs(&self) -> Vec<String> {
        self.current_step()
            .map(|step| {
                step.requires
                    .iter()
                    .filter(|key| !self.context.has_value(key))
                    .map(|key| key.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Render the current step's prompt from the context as it stands,
    /// without running enrichments
    pub fn preview_prompt(&self) -> Result<PromptPreview, WorkflowError> {
        let template = self.require_step()?.prompt();

        Ok(PromptPreview {
            prompt: template.render(&self.context),
            unresolved: template
                .unresolved(&self.context)
                .into_iter()
                .map(String::from)
                .collect(),
        })
    }

    /// Run the current step and store its result
    ///
    /// On any error the context and position are left untouched.
    #[instrument(skip(self, services), fields(workflow = %self.kind, position = ?self.position))]
    pub async fn run_step(
        &mut self,
        services: StepServices<'_>,
    ) -> Result<StepOutcome, WorkflowError> {
        let step = self.require_step()?;
        let step_index = self.step_index();

        let missing = self.missing_inputs();
        if !missing.is_empty() {
            return Err(WorkflowError::missing_inputs(step.title, missing));
        }

        let mut staged = self.context.clone();
        for enrichment in step.enrichments {
            apply_enrichment(enrichment, &mut staged, services).await?;
        }

        let prompt = step.prompt().render(&staged);
        debug!(step = step.title, prompt_len = prompt.len(), "Rendered prompt");

        let content = services.generator.generate(&prompt).await.map_err(|e| {
            warn!(step = step.title, error = %e, "Step generation failed");
            WorkflowError::from(e)
        })?;

        staged.insert(step.result_key, content.clone());
        self.history.push(HistoryEntry {
            timestamp: Utc::now(),
            workflow_id: self.kind.id().to_string(),
            step_index,
            step_title: step.title.to_string(),
            result_key: step.result_key.to_string(),
            data: staged.clone(),
        });
        self.context = staged;

        info!(step = step.title, result_key = step.result_key, "Step completed");

        Ok(StepOutcome {
            step_index,
            step_title: step.title.to_string(),
            result_key: step.result_key.to_string(),
            content,
        })
    }

    /// Move to the next step once the current step has a result
    pub fn advance(&mut self) -> Result<RunnerPosition, WorkflowError> {
        let step = self.require_step()?;
        let index = self.step_index();

        if !self.context.contains(step.result_key) {
            return Err(WorkflowError::step_not_ready(step.title));
        }

        self.position = if index + 1 < self.definition().step_count() {
            RunnerPosition::Step(index + 1)
        } else {
            RunnerPosition::Completed
        };

        Ok(self.position)
    }

    /// Move back one step; a no-op on the first step
    pub fn retreat(&mut self) -> RunnerPosition {
        self.position = match self.position {
            RunnerPosition::Step(index) => RunnerPosition::Step(index.saturating_sub(1)),
            RunnerPosition::Completed => {
                RunnerPosition::Step(self.definition().step_count().saturating_sub(1))
            }
        };
        self.position
    }

    /// Merge the data saved with history entry `index` into the context
    pub fn reuse_history(&mut self, index: usize) -> Result<(), WorkflowError> {
        let data = self.history_entry(index)?.data.clone();
        self.context.extend(data.iter());
        Ok(())
    }

    /// Merge the data of history entry `index` and restart its workflow
    /// from the first step, keeping the merged context
    pub fn continue_from_history(&mut self, index: usize) -> Result<(), WorkflowError> {
        let entry = self.history_entry(index)?;
        let kind: WorkflowKind = entry.workflow_id.parse()?;
        let data = entry.data.clone();

        info!(workflow = %kind, history_index = index, "Continuing from history");
        self.context.extend(data.iter());
        self.kind = kind;
        self.position = RunnerPosition::Step(0);
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let definition = self.definition();
        let current = self.current_step();

        SessionSnapshot {
            workflow_id: definition.id,
            workflow_name: definition.name,
            position: self.position,
            step_count: definition.step_count(),
            current_step: current.map(|s| s.title),
            completed: self.is_completed(),
            step_ready: current.is_some_and(|s| self.context.contains(s.result_key)),
            context: self.context.clone(),
        }
    }

    fn step_index(&self) -> usize {
        match self.position {
            RunnerPosition::Step(index) => index,
            RunnerPosition::Completed => self.definition().step_count(),
        }
    }

    fn history_entry(&self, index: usize) -> Result<&HistoryEntry, WorkflowError> {
        self.history
            .get(index)
            .ok_or_else(|| WorkflowError::validation(format!("History entry {} does not exist", index)))
    }

    fn require_step(&self) -> Result<&'static StepDefinition, WorkflowError> {
        self.current_step()
            .ok_or_else(|| WorkflowError::completed(self.kind.id()))
    }
}

async fn apply_enrichment(
    enrichment: &Enrichment,
    context: &mut ExecutionContext,
    services: StepServices<'_>,
) -> Result<(), WorkflowError> {
    let Some(source) = context.get(enrichment.source()).map(str::trim) else {
        return Ok(());
    };
    if source.is_empty() {
        return Ok(());
    }

    let value = match enrichment {
        Enrichment::PageSummary { .. } => {
            let url = extract_urls(source).into_iter().next();
            summarize(services.pages, url.as_deref().unwrap_or(source)).await
        }
        Enrichment::KeywordMetrics { .. } => {
            let mut metrics = services.keywords.lookup(source).await?;
            metrics.truncate(MAX_KEYWORD_RESULTS);
            render_table(&metrics)
        }
        Enrichment::ExtractedKeywordMetrics { .. } => {
            let seeds = seed_keywords(source);
            debug!(?seeds, "Looking up extracted keywords");

            let mut metrics = Vec::new();
            for seed in &seeds {
                metrics.extend(services.keywords.lookup(seed).await?);
            }
            metrics.truncate(MAX_KEYWORD_RESULTS);
            render_table(&metrics)
        }
    };

    context.insert(enrichment.target(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::keyword::{mock::MockKeywordProvider, KeywordMetric};
    use crate::domain::llm::{MockLlmProvider, TextGenerationClient};
    use crate::domain::page::{mock::MockPageFetcher, PageContent};

    struct Fixture {
        provider: Arc<MockLlmProvider>,
        generator: TextGenerationClient,
        keywords: MockKeywordProvider,
        pages: MockPageFetcher,
    }

    impl Fixture {
        fn new(provider: MockLlmProvider) -> Self {
            let provider = Arc::new(provider);
            Self {
                generator: TextGenerationClient::new(provider.clone(), "mock-model"),
                provider,
                keywords: MockKeywordProvider::new(vec![KeywordMetric::new(
                    "seo basics how to",
                    1000,
                    0.3,
                    50.0,
                )]),
                pages: MockPageFetcher::new(),
            }
        }

        fn services(&self) -> StepServices<'_> {
            StepServices {
                generator: &self.generator,
                keywords: &self.keywords,
                pages: &self.pages,
            }
        }
    }

    fn planning_runner() -> StepRunner {
        let mut runner = StepRunner::new(WorkflowKind::VideoPlanning);
        runner
            .set_inputs([("channel_theme", "Cooking"), ("main_keyword", "seo basics")])
            .unwrap();
        runner
    }

    #[tokio::test]
    async fn test_missing_inputs_block_step_without_side_effects() {
        let fixture = Fixture::new(MockLlmProvider::new("mock").with_response("text"));
        let mut runner = StepRunner::new(WorkflowKind::VideoPlanning);
        runner.set_input("channel_theme", "Cooking").unwrap();
        runner.set_input("main_keyword", "   ").unwrap();
        let before = runner.context().clone();

        let err = runner.run_step(fixture.services()).await.unwrap_err();

        assert_eq!(
            err,
            WorkflowError::missing_inputs("Keyword intent", vec!["main_keyword".to_string()])
        );
        assert_eq!(runner.context(), &before);
        assert_eq!(runner.position(), RunnerPosition::Step(0));
        assert_eq!(fixture.provider.call_count(), 0);
        assert!(runner.history().is_empty());
    }

    #[tokio::test]
    async fn test_full_run_reaches_completed() {
        let fixture = Fixture::new(
            MockLlmProvider::new("mock")
                .then_reply("intent")
                .then_reply("competition")
                .then_reply("plans")
                .then_reply("scores"),
        );
        let mut runner = planning_runner();

        for _ in 0..4 {
            runner.run_step(fixture.services()).await.unwrap();
            runner.advance().unwrap();
        }

        assert!(runner.is_completed());
        assert_eq!(runner.context().get("search_intent"), Some("intent"));
        assert_eq!(runner.context().get("evaluation"), Some("scores"));
        assert_eq!(runner.history().len(), 4);
        assert_eq!(runner.history()[3].step_index, 3);
        assert_eq!(runner.history()[3].result_key, "evaluation");
    }

    #[tokio::test]
    async fn test_failed_generation_leaves_state_untouched_and_is_retryable() {
        let fixture = Fixture::new(
            MockLlmProvider::new("mock")
                .then_reply("intent")
                .then_fail("upstream timeout")
                .then_reply("competition"),
        );
        let mut runner = planning_runner();
        runner.run_step(fixture.services()).await.unwrap();
        runner.advance().unwrap();
        let before = runner.context().clone();

        let err = runner.run_step(fixture.services()).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(runner.position(), RunnerPosition::Step(1));
        assert_eq!(runner.context(), &before);
        assert!(!runner.context().contains("keyword_metrics"));
        assert_eq!(runner.history().len(), 1);

        let outcome = runner.run_step(fixture.services()).await.unwrap();
        assert_eq!(outcome.content, "competition");
        assert_eq!(runner.context().get("competitive_analysis"), Some("competition"));
    }

    #[tokio::test]
    async fn test_unconfigured_generator_reports_configuration_missing() {
        let fixture = Fixture::new(MockLlmProvider::new("mock"));
        let generator = TextGenerationClient::unconfigured("gemini-2.0-flash-exp");
        let services = StepServices {
            generator: &generator,
            ..fixture.services()
        };
        let mut runner = planning_runner();

        let err = runner.run_step(services).await.unwrap_err();

        assert!(matches!(err, WorkflowError::ConfigurationMissing(_)));
        assert!(!runner.context().contains("search_intent"));
    }

    #[tokio::test]
    async fn test_advance_requires_step_result() {
        let fixture = Fixture::new(MockLlmProvider::new("mock").with_response("done"));
        let mut runner = planning_runner();

        assert_eq!(
            runner.advance(),
            Err(WorkflowError::step_not_ready("Keyword intent"))
        );
        assert_eq!(runner.position(), RunnerPosition::Step(0));

        runner.run_step(fixture.services()).await.unwrap();
        assert_eq!(runner.advance(), Ok(RunnerPosition::Step(1)));
    }

    #[tokio::test]
    async fn test_blank_completion_is_stored_and_counts_as_result() {
        let fixture = Fixture::new(MockLlmProvider::new("mock").then_reply("  "));
        let mut runner = planning_runner();

        let outcome = runner.run_step(fixture.services()).await.unwrap();

        assert_eq!(outcome.content, "  ");
        assert_eq!(runner.context().get("search_intent"), Some("  "));
        assert!(runner.snapshot().step_ready);
        assert_eq!(runner.advance(), Ok(RunnerPosition::Step(1)));
    }

    #[tokio::test]
    async fn test_retreat_preserves_context() {
        let fixture = Fixture::new(MockLlmProvider::new("mock").with_response("result"));
        let mut runner = planning_runner();

        assert_eq!(runner.retreat(), RunnerPosition::Step(0));

        runner.run_step(fixture.services()).await.unwrap();
        runner.advance().unwrap();
        let before = runner.context().clone();

        assert_eq!(runner.retreat(), RunnerPosition::Step(0));
        assert_eq!(runner.context(), &before);

        // the stored result lets us move forward again without regenerating
        assert_eq!(runner.advance(), Ok(RunnerPosition::Step(1)));
        assert_eq!(fixture.provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_completed_state_transitions() {
        let fixture = Fixture::new(MockLlmProvider::new("mock").with_response("result"));
        let mut runner = planning_runner();
        for _ in 0..4 {
            runner.run_step(fixture.services()).await.unwrap();
            runner.advance().unwrap();
        }

        assert_eq!(
            runner.run_step(fixture.services()).await.unwrap_err(),
            WorkflowError::completed("video_planning")
        );
        assert_eq!(runner.advance(), Err(WorkflowError::completed("video_planning")));
        assert!(runner.snapshot().current_step.is_none());

        assert_eq!(runner.retreat(), RunnerPosition::Step(3));
        assert!(runner.snapshot().step_ready);
    }

    #[tokio::test]
    async fn test_rerun_overwrites_result() {
        let fixture = Fixture::new(
            MockLlmProvider::new("mock")
                .then_reply("first draft")
                .then_reply("second draft"),
        );
        let mut runner = planning_runner();

        runner.run_step(fixture.services()).await.unwrap();
        runner.run_step(fixture.services()).await.unwrap();

        assert_eq!(runner.context().get("search_intent"), Some("second draft"));
        assert_eq!(runner.position(), RunnerPosition::Step(0));
    }

    #[tokio::test]
    async fn test_reset_clears_context() {
        let fixture = Fixture::new(MockLlmProvider::new("mock").with_response("result"));
        let mut runner = planning_runner();
        runner.run_step(fixture.services()).await.unwrap();
        runner.advance().unwrap();

        runner.reset();

        assert!(runner.context().is_empty());
        assert_eq!(runner.position(), RunnerPosition::Step(0));
        assert_eq!(runner.kind(), WorkflowKind::VideoPlanning);
    }

    #[test]
    fn test_start_switches_workflow_and_clears_context() {
        let mut runner = planning_runner();
        runner.start(WorkflowKind::ShortsScript);

        assert_eq!(runner.definition().id, "shorts_script");
        assert!(runner.context().is_empty());
        assert_eq!(runner.position(), RunnerPosition::Step(0));
    }

    #[tokio::test]
    async fn test_keyword_enrichment_is_rendered_into_prompt() {
        let fixture = Fixture::new(MockLlmProvider::new("mock").with_response("result"));
        let mut runner = planning_runner();
        runner.run_step(fixture.services()).await.unwrap();
        runner.advance().unwrap();

        runner.run_step(fixture.services()).await.unwrap();

        assert_eq!(fixture.keywords.seeds(), vec!["seo basics"]);
        let prompt = fixture.provider.requests()[1].user_text();
        assert!(prompt.contains("seo basics how to | 1000 | 0.30 | 50"));
        assert!(runner.context().get("keyword_metrics").is_some());
    }

    #[tokio::test]
    async fn test_keyword_lookup_failure_fails_step() {
        let mut fixture = Fixture::new(MockLlmProvider::new("mock").with_response("result"));
        fixture.keywords = MockKeywordProvider::failing("HTTP 500");
        let mut runner = planning_runner();
        runner.run_step(fixture.services()).await.unwrap();
        runner.advance().unwrap();

        let err = runner.run_step(fixture.services()).await.unwrap_err();

        assert_eq!(err, WorkflowError::Service("keywords: HTTP 500".to_string()));
        assert_eq!(fixture.provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_page_enrichment_feeds_prompt_and_failure_is_inlined() {
        let mut page = PageContent::new("https://acme.test");
        page.title = "Acme Cloud".to_string();
        let mut fixture = Fixture::new(MockLlmProvider::new("mock").with_response("keywords"));
        fixture.pages = MockPageFetcher::new().with_page(page);

        let mut runner = StepRunner::new(WorkflowKind::ChannelConcept);
        runner
            .set_inputs([("product_name", "Acme"), ("service_url", "https://acme.test")])
            .unwrap();
        runner.run_step(fixture.services()).await.unwrap();
        assert!(fixture.provider.requests()[0]
            .user_text()
            .contains("Page title: Acme Cloud"));

        runner.set_input("service_url", "https://down.test").unwrap();
        runner.run_step(fixture.services()).await.unwrap();
        assert!(fixture.provider.requests()[1]
            .user_text()
            .contains("Failed to read https://down.test"));
    }

    #[tokio::test]
    async fn test_page_enrichment_extracts_url_from_free_text() {
        let mut page = PageContent::new("https://acme.test/pricing");
        page.title = "Acme Pricing".to_string();
        let mut fixture = Fixture::new(MockLlmProvider::new("mock").with_response("keywords"));
        fixture.pages = MockPageFetcher::new().with_page(page);

        let mut runner = StepRunner::new(WorkflowKind::ChannelConcept);
        runner
            .set_inputs([
                ("product_name", "Acme"),
                ("service_url", "Our site: https://acme.test/pricing, see plans"),
            ])
            .unwrap();
        runner.run_step(fixture.services()).await.unwrap();

        assert_eq!(
            runner.context().get("service_page"),
            Some("Page title: Acme Pricing\nMeta description: \n\nMain content:\n")
        );
    }

    #[tokio::test]
    async fn test_keyword_step_seeds_from_extracted_keywords() {
        let mut fixture = Fixture::new(
            MockLlmProvider::new("mock")
                .then_reply("Keywords:\n1. Core: cloud storage\n2. Problem: file sync\n- backup tools\n- team drive")
                .then_reply("analysis"),
        );
        fixture.keywords = MockKeywordProvider::new(
            (0..15)
                .map(|i| KeywordMetric::new(format!("kw {}", i), 100, 0.5, 10.0))
                .collect(),
        );
        let mut runner = StepRunner::new(WorkflowKind::ChannelConcept);
        runner
            .set_inputs([("product_name", "Acme Drive"), ("service_url", "https://acme.test")])
            .unwrap();

        runner.run_step(fixture.services()).await.unwrap();
        runner.advance().unwrap();
        runner.run_step(fixture.services()).await.unwrap();

        assert_eq!(
            fixture.keywords.seeds(),
            vec!["cloud storage", "file sync", "backup tools"]
        );
        let table = runner.context().get("keyword_metrics").unwrap();
        assert_eq!(table.lines().count(), MAX_KEYWORD_RESULTS + 1);
        assert_eq!(runner.context().get("keywords_analysis"), Some("analysis"));
    }

    #[tokio::test]
    async fn test_history_entries_snapshot_context() {
        let fixture = Fixture::new(
            MockLlmProvider::new("mock")
                .then_reply("intent")
                .then_reply("competition"),
        );
        let mut runner = planning_runner();
        runner.run_step(fixture.services()).await.unwrap();
        runner.advance().unwrap();
        runner.run_step(fixture.services()).await.unwrap();

        let first = &runner.history()[0].data;
        assert_eq!(first.get("search_intent"), Some("intent"));
        assert_eq!(first.get("main_keyword"), Some("seo basics"));
        assert!(!first.contains("competitive_analysis"));
        assert_eq!(
            runner.history()[1].data.get("competitive_analysis"),
            Some("competition")
        );
    }

    #[tokio::test]
    async fn test_reuse_history_merges_saved_data() {
        let fixture = Fixture::new(MockLlmProvider::new("mock").with_response("intent"));
        let mut runner = planning_runner();
        runner.run_step(fixture.services()).await.unwrap();
        runner.advance().unwrap();
        runner.reset();
        runner.set_input("channel_name", "Chef Lab").unwrap();

        runner.reuse_history(0).unwrap();

        assert_eq!(runner.context().get("search_intent"), Some("intent"));
        assert_eq!(runner.context().get("channel_name"), Some("Chef Lab"));
        assert_eq!(runner.position(), RunnerPosition::Step(0));
        assert_eq!(runner.kind(), WorkflowKind::VideoPlanning);
    }

    #[tokio::test]
    async fn test_continue_from_history_switches_back_to_entry_workflow() {
        let fixture = Fixture::new(MockLlmProvider::new("mock").with_response("intent"));
        let mut runner = planning_runner();
        runner.run_step(fixture.services()).await.unwrap();
        runner.advance().unwrap();
        runner.start(WorkflowKind::ShortsScript);
        runner.set_input("video_title", "Knife skills").unwrap();

        runner.continue_from_history(0).unwrap();

        assert_eq!(runner.kind(), WorkflowKind::VideoPlanning);
        assert_eq!(runner.position(), RunnerPosition::Step(0));
        assert_eq!(runner.context().get("search_intent"), Some("intent"));
        assert_eq!(runner.context().get("video_title"), Some("Knife skills"));
        assert_eq!(runner.history().len(), 1);
    }

    #[test]
    fn test_unknown_history_entry_is_rejected() {
        let mut runner = planning_runner();
        let before = runner.context().clone();

        assert!(matches!(
            runner.reuse_history(0),
            Err(WorkflowError::Validation(_))
        ));
        assert!(matches!(
            runner.continue_from_history(3),
            Err(WorkflowError::Validation(_))
        ));
        assert_eq!(runner.context(), &before);
    }

    #[test]
    fn test_preview_prompt_marks_missing_values() {
        let mut runner = StepRunner::new(WorkflowKind::ShortsScript);
        runner.set_input("video_title", "Knife skills").unwrap();

        let preview = runner.preview_prompt().unwrap();
        assert!(preview.prompt.contains("Title: Knife skills"));
        assert!(preview.prompt.contains("[video_concept not provided]"));
        assert!(preview.unresolved.contains(&"video_concept".to_string()));
        assert!(!preview.unresolved.contains(&"video_title".to_string()));
    }

    #[test]
    fn test_set_inputs_rejects_blank_keys_atomically() {
        let mut runner = StepRunner::new(WorkflowKind::ShortsScript);
        let err = runner
            .set_inputs([("video_title", "ok"), (" ", "bad")])
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Validation(_)));
        assert!(runner.context().is_empty());
    }

    #[test]
    fn test_snapshot_serialization() {
        let runner = planning_runner();
        let json = serde_json::to_value(runner.snapshot()).unwrap();

        assert_eq!(json["workflow_id"], "video_planning");
        assert_eq!(json["position"]["state"], "step");
        assert_eq!(json["position"]["index"], 0);
        assert_eq!(json["step_ready"], false);
        assert_eq!(json["context"]["main_keyword"], "seo basics");
    }
}
