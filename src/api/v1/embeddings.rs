//! Embeddings endpoint handler

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, EmbeddingsRequest, EmbeddingsResponse, Json};

/// POST /v1/embeddings
pub async fn create_embeddings(
    State(state): State<AppState>,
    Json(request): Json<EmbeddingsRequest>,
) -> Result<Json<EmbeddingsResponse>, ApiError> {
    let inputs = request.into_inputs();

    if inputs.is_empty() {
        return Err(ApiError::bad_request("Provide 'text' or a non-empty 'texts'").with_param("texts"));
    }

    let embeddings = state.embedder.embed(inputs).await?;

    Ok(Json(EmbeddingsResponse { embeddings }))
}
