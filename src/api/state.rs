//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::WorkflowService;

/// State shared by every request handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub workflow_service: Arc<WorkflowService>,
}

impl AppState {
    pub fn new(workflow_service: WorkflowService) -> Self {
        Self {
            workflow_service: Arc::new(workflow_service),
        }
    }
}
