//! Versioned retrieval API

pub mod embeddings;
pub mod items;
pub mod search;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/search", post(search::search))
        .route("/items", post(items::upsert_item))
        .route("/items/{item_id}", get(items::get_item))
        .route("/embeddings", post(embeddings::create_embeddings))
}
