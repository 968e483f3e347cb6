//! Item endpoint handlers

use axum::extract::{Path, State};
use tracing::debug;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{ItemCreate, ItemRead};

/// POST /v1/items
pub async fn upsert_item(
    State(state): State<AppState>,
    Json(create): Json<ItemCreate>,
) -> Result<Json<ItemRead>, ApiError> {
    debug!(
        item_id = ?create.id,
        async_embedding = create.async_embedding,
        "Upserting item"
    );

    let item = state.item_service.upsert(create).await?;

    Ok(Json(item))
}

/// GET /v1/items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<ItemRead>, ApiError> {
    let id = Uuid::parse_str(&item_id).map_err(|_| {
        ApiError::bad_request(format!("Invalid item id '{}'", item_id)).with_param("item_id")
    })?;

    debug!(item_id = %id, "Getting item");

    let item = state.item_service.get(id).await?;

    Ok(Json(item))
}
