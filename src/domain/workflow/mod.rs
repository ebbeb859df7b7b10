//! Workflow domain module
//!
//! A workflow is a fixed sequence of prompt-template steps. Form inputs and
//! generated results accumulate in an [`ExecutionContext`]; each step renders
//! its template from that context, asks the text generator for a completion
//! and stores the result under its own key for later steps to reference.
//!
//! [`StepRunner`] drives one workflow at a time:
//! - `run_step` generates the current step's result (retryable on failure)
//! - `advance` / `retreat` move between steps without losing results
//! - `reset` starts over with an empty context

pub mod catalog;
mod context;
mod entity;
mod error;
mod export;
mod runner;

pub use catalog::WorkflowKind;
pub use context::ExecutionContext;
pub use entity::{Enrichment, InputField, StepDefinition, WorkflowDefinition};
pub use error::WorkflowError;
pub use export::{export_file_name, export_text};
pub use runner::{
    HistoryEntry, PromptPreview, RunnerPosition, SessionSnapshot, StepOutcome, StepRunner,
    StepServices,
};
