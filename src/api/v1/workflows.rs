//! Workflow catalog endpoints

use axum::extract::{Path, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ListResponse};
use crate::domain::WorkflowDefinition;

/// GET /v1/workflows
pub async fn list_workflows(
    State(state): State<AppState>,
) -> Json<ListResponse<&'static WorkflowDefinition>> {
    Json(ListResponse::new(state.workflow_service.list_workflows()))
}

/// GET /v1/workflows/{workflow_id}
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> Result<Json<&'static WorkflowDefinition>, ApiError> {
    debug!(workflow_id = %workflow_id, "Getting workflow");

    let definition = state.workflow_service.get_workflow(&workflow_id)?;
    Ok(Json(definition))
}
