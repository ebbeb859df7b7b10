//! Session endpoints: inputs, step execution, navigation and export

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CreateSessionRequest, Json, ListResponse, PromptPreviewResponse,
    RestartSessionRequest, UpdateInputsRequest,
};
use crate::domain::workflow::{HistoryEntry, StepOutcome};
use crate::infrastructure::services::SessionView;

/// GET /v1/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<SessionView>>, ApiError> {
    let sessions = state.workflow_service.list_sessions().await?;
    Ok(Json(ListResponse::new(sessions)))
}

/// POST /v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let session = state
        .workflow_service
        .create_session(&request.workflow_id, request.inputs)
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /v1/sessions/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.workflow_service.get_session(&session_id).await?))
}

/// DELETE /v1/sessions/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.workflow_service.delete_session(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /v1/sessions/{session_id}/inputs
pub async fn update_inputs(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<UpdateInputsRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .workflow_service
        .set_inputs(&session_id, request.inputs)
        .await?;

    Ok(Json(session))
}

/// POST /v1/sessions/{session_id}/run
pub async fn run_step(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<StepOutcome>, ApiError> {
    debug!(session_id = %session_id, "Running step");

    match state.workflow_service.run_step(&session_id).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            if e.is_retryable() {
                warn!(session_id = %session_id, error = %e, "Step generation failed");
            }
            Err(e.into())
        }
    }
}

/// POST /v1/sessions/{session_id}/advance
pub async fn advance(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.workflow_service.advance(&session_id).await?))
}

/// POST /v1/sessions/{session_id}/retreat
pub async fn retreat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.workflow_service.retreat(&session_id).await?))
}

/// POST /v1/sessions/{session_id}/reset
pub async fn reset(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.workflow_service.reset(&session_id).await?))
}

/// POST /v1/sessions/{session_id}/restart
pub async fn restart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<RestartSessionRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .workflow_service
        .restart(&session_id, &request.workflow_id)
        .await?;

    Ok(Json(session))
}

/// GET /v1/sessions/{session_id}/prompt
pub async fn preview_prompt(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<PromptPreviewResponse>, ApiError> {
    let preview = state.workflow_service.preview_prompt(&session_id).await?;

    Ok(Json(PromptPreviewResponse {
        prompt: preview.prompt,
        unresolved: preview.unresolved,
    }))
}

/// GET /v1/sessions/{session_id}/history
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ListResponse<HistoryEntry>>, ApiError> {
    let entries = state.workflow_service.history(&session_id).await?;
    Ok(Json(ListResponse::new(entries)))
}

/// POST /v1/sessions/{session_id}/history/{index}/reuse
pub async fn reuse_history(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(String, usize)>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .workflow_service
        .reuse_history(&session_id, index)
        .await?;

    Ok(Json(session))
}

/// POST /v1/sessions/{session_id}/history/{index}/continue
pub async fn continue_from_history(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(String, usize)>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .workflow_service
        .continue_from_history(&session_id, index)
        .await?;

    Ok(Json(session))
}

/// GET /v1/sessions/{session_id}/export
///
/// Returns the plain-text document as an attachment.
pub async fn export(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, ApiError> {
    let document = state.workflow_service.export(&session_id).await?;
    let disposition = format!("attachment; filename=\"{}\"", document.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.content,
    )
        .into_response())
}
