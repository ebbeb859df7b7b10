//! Plain-text export of a workflow run

use chrono::{DateTime, Utc};

use super::context::ExecutionContext;
use super::entity::WorkflowDefinition;

const NOT_PROVIDED: &str = "(not provided)";
const NOT_GENERATED: &str = "(not generated)";

/// Render the declared inputs and every step result as one document
pub fn export_text(
    definition: &WorkflowDefinition,
    context: &ExecutionContext,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", definition.name));
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str("\n[Inputs]\n");
    for field in definition.inputs {
        let value = context
            .get(field.key)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(NOT_PROVIDED);
        out.push_str(&format!("{}: {}\n", field.label, value));
    }

    for step in definition.steps {
        let result = context
            .get(step.result_key)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(NOT_GENERATED);
        out.push_str(&format!("\n[{}]\n{}\n", step.title, result.trim_end()));
    }

    out
}

/// `<workflow_id>_<YYYYmmdd_HHMMSS>.txt`
pub fn export_file_name(workflow_id: &str, generated_at: DateTime<Utc>) -> String {
    format!("{}_{}.txt", workflow_id, generated_at.format("%Y%m%d_%H%M%S"))
}
