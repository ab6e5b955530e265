//! TOML configuration for the store, the remote endpoint and the cache.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{
    CacheConfig, Config, RemoteConfig, StoreConfig, DEFAULT_BASE_URL, DEFAULT_CACHE_KEY,
    DEFAULT_CACHE_TTL_MS, DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE,
};
