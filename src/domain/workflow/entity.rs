//! Workflow definition types
//!
//! Definitions are plain `'static` data: the catalog is compiled into the
//! binary and never mutated.

use serde::Serialize;

use crate::domain::prompt::PromptTemplate;

/// A form input understood by a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
}

impl InputField {
    pub const fn required(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            required: true,
        }
    }

    pub const fn optional(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            required: false,
        }
    }
}

/// Data derived from an existing context value before a step is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Enrichment {
    /// Fetch the URL stored under `source` and store a text summary under `target`
    PageSummary {
        source: &'static str,
        target: &'static str,
    },
    /// Look up keyword metrics for the seed under `source`, store a table under `target`
    KeywordMetrics {
        source: &'static str,
        target: &'static str,
    },
    /// Pick up to three seeds from the keyword list under `source`, look each
    /// one up and store the merged table under `target`
    ExtractedKeywordMetrics {
        source: &'static str,
        target: &'static str,
    },
}

impl Enrichment {
    pub fn source(&self) -> &'static str {
        match self {
            Self::PageSummary { source, .. }
            | Self::KeywordMetrics { source, .. }
            | Self::ExtractedKeywordMetrics { source, .. } => source,
        }
    }

    pub fn target(&self) -> &'static str {
        match self {
            Self::PageSummary { target, .. }
            | Self::KeywordMetrics { target, .. }
            | Self::ExtractedKeywordMetrics { target, .. } => target,
        }
    }
}

/// One wizard step: a prompt template plus where its result is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub title: &'static str,
    pub template: &'static str,
    /// Context key the generated text is stored under
    pub result_key: &'static str,
    /// Context keys that must be non-empty before the step may run
    pub requires: &'static [&'static str],
    pub enrichments: &'static [Enrichment],
}

impl StepDefinition {
    pub fn prompt(&self) -> PromptTemplate {
        PromptTemplate::parse(self.template)
    }
}

/// An immutable, named sequence of prompt-template steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub inputs: &'static [InputField],
    pub steps: &'static [StepDefinition],
}

impl WorkflowDefinition {
    pub fn step(&self, index: usize) -> Option<&'static StepDefinition> {
        self.steps.get(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn input(&self, key: &str) -> Option<&'static InputField> {
        self.inputs.iter().find(|f| f.key == key)
    }

    pub fn required_inputs(&self) -> impl Iterator<Item = &'static InputField> {
        self.inputs.iter().filter(|f| f.required)
    }
}
