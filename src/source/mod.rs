//! Remote collection source.
//!
//! The network layer has no pagination: [`RemoteSource::fetch_all`] returns the
//! whole collection in one call and the store slices it locally.

mod http;

pub use http::HttpSource;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while fetching the remote collection.
///
/// The `Display` text is what the store surfaces as `last_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Server answered with a non-success status.
    #[error("API Error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    /// Connection refused, DNS failure, reset, ...
    #[error("{0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Capability to fetch the full ordered record collection.
#[async_trait]
pub trait RemoteSource<R>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<R>, FetchError>;
}
