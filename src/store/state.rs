use crate::config::{StoreConfig, DEFAULT_CACHE_KEY, DEFAULT_CACHE_TTL_MS, DEFAULT_PAGE_SIZE};
use crate::model::Record;
use crate::mvi::State;

use super::StoreError;

/// Pagination and cache policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub page_size: usize,
    pub cache_ttl_ms: u64,
    pub cache_key: String,
}

impl StoreSettings {
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.page_size == 0 {
            return Err(StoreError::InvalidSettings(
                "page_size must be greater than zero".to_string(),
            ));
        }
        if self.cache_key.is_empty() {
            return Err(StoreError::InvalidSettings(
                "cache_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
        }
    }
}

impl From<&StoreConfig> for StoreSettings {
    fn from(config: &StoreConfig) -> Self {
        Self {
            page_size: config.page_size,
            cache_ttl_ms: config.cache_ttl_ms,
            cache_key: config.cache_key.clone(),
        }
    }
}

/// Everything a consumer renders: materialized records, the filtered view
/// and the load status.
///
/// `view` is always `derive_view(&all, &query)`. `all` holds the first
/// `min(page_cursor * page_size, total)` records of the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<R: Record> {
    pub all: Vec<R>,
    pub view: Vec<R>,
    pub query: String,
    /// Pages materialized so far.
    pub page_cursor: usize,
    /// Length of the full collection as last resolved.
    pub total: usize,
    pub has_more: bool,
    pub loading: bool,
    pub last_error: Option<String>,
    pub selected: Option<R::Id>,
    pub dark_mode: bool,
}

impl<R: Record> Default for StoreState<R> {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            view: Vec::new(),
            query: String::new(),
            page_cursor: 0,
            total: 0,
            has_more: true,
            loading: false,
            last_error: None,
            selected: None,
            dark_mode: false,
        }
    }
}

impl<R: Record> State for StoreState<R> {}

impl<R: Record> StoreState<R> {
    /// Whether a "load more" affordance should be offered.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading && !self.all.is_empty()
    }
}
