//! Version 1 workflow API

pub mod sessions;
pub mod tools;
pub mod workflows;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/workflows", get(workflows::list_workflows))
        .route("/workflows/{workflow_id}", get(workflows::get_workflow))
        .route(
            "/sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            "/sessions/{session_id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/sessions/{session_id}/inputs", put(sessions::update_inputs))
        .route("/sessions/{session_id}/run", post(sessions::run_step))
        .route("/sessions/{session_id}/advance", post(sessions::advance))
        .route("/sessions/{session_id}/retreat", post(sessions::retreat))
        .route("/sessions/{session_id}/reset", post(sessions::reset))
        .route("/sessions/{session_id}/restart", post(sessions::restart))
        .route("/sessions/{session_id}/prompt", get(sessions::preview_prompt))
        .route("/sessions/{session_id}/history", get(sessions::history))
        .route(
            "/sessions/{session_id}/history/{index}/reuse",
            post(sessions::reuse_history),
        )
        .route(
            "/sessions/{session_id}/history/{index}/continue",
            post(sessions::continue_from_history),
        )
        .route("/sessions/{session_id}/export", get(sessions::export))
        .route("/keywords", get(tools::keywords))
        .route("/pages/fetch", post(tools::fetch_page))
}
