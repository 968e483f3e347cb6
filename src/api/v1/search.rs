//! Search endpoint handler

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{SearchRequest, SearchResponse};

/// POST /v1/search
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    debug!(top_k = request.top_k, hybrid = request.wants_hybrid(), "Search request");

    let response = state.search_service.search(request).await?;

    Ok(Json(response))
}
