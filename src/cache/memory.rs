use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{CacheError, PersistentCache};

/// Process-local cache. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryCache {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the entry under `key`. Returns true if one existed.
    pub fn remove(&self, key: &str) -> bool {
        self.slots.lock().remove(key).is_some()
    }
}

#[async_trait]
impl PersistentCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.slots.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError> {
        self.slots.lock().insert(key.to_string(), bytes);
        Ok(())
    }
}
