//! Infrastructure services

mod item_service;
mod search_service;

pub use item_service::{ItemService, ItemServiceTrait};
pub use search_service::{SearchService, SearchServiceTrait};

#[cfg(test)]
pub use item_service::mock::MockItemService;
#[cfg(test)]
pub use search_service::mock::MockSearchService;
