//! Search domain - request/response types, cache keys and the cache namespace

mod cache_key;
mod namespace;
mod request;
mod response;

pub use cache_key::{build_search_cache_key, SEARCH_KEY_PREFIX};
pub use namespace::{CacheNamespace, INITIAL_NAMESPACE, NAMESPACE_KEY};
pub use request::{SearchRequest, DEFAULT_TOP_K, MAX_TOP_K, MIN_TOP_K};
pub use response::{SearchResponse, SearchResult};
