//! Item store implementations

mod in_memory;
mod pgvector;

pub use in_memory::InMemoryItemRepository;
pub use pgvector::PgvectorItemRepository;
