//! Persistent key→bytes cache and the entry stored in it.
//!
//! The store only needs `get` and `set`; an entry is always replaced as a
//! whole, never merged.

mod entry;
mod file;
mod memory;

pub use entry::CacheEntry;
pub use file::FileCache;
pub use memory::MemoryCache;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by cache backends and entry (de)serialization.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O failed at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode cache entry: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Corrupt cache entry: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Cache task failed: {0}")]
    Task(String),

    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Durable key→bytes storage with arbitrary latency.
#[async_trait]
pub trait PersistentCache: Send + Sync {
    /// Read the bytes stored under `key`. `Ok(None)` means no entry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace whatever is stored under `key`.
    async fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError>;
}
