//! Standalone keyword and page tools

use axum::extract::{Query, State};

use crate::api::state::AppState;
use crate::api::types::{ApiError, FetchPageRequest, Json, KeywordQuery, KeywordsResponse};
use crate::domain::keyword::render_table;
use crate::domain::PageContent;

/// GET /v1/keywords?seed=...
pub async fn keywords(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> Result<Json<KeywordsResponse>, ApiError> {
    let keywords = state.workflow_service.keyword_metrics(&query.seed).await?;

    Ok(Json(KeywordsResponse {
        seed: query.seed.trim().to_string(),
        provider: state.workflow_service.keyword_provider_name(),
        table: render_table(&keywords),
        keywords,
    }))
}

/// POST /v1/pages/fetch
pub async fn fetch_page(
    State(state): State<AppState>,
    Json(request): Json<FetchPageRequest>,
) -> Result<Json<PageContent>, ApiError> {
    let page = state.workflow_service.fetch_page(&request.url).await?;
    Ok(Json(page))
}
