//! Cache domain - key/value cache abstraction and key construction

mod key;
mod repository;

pub use key::{canonical_json, CacheKeyParams, KEY_SEPARATOR};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
