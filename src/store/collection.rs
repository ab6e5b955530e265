use std::sync::Arc;

use parking_lot::RwLock;
use scopeguard::ScopeGuard;
use tokio::sync::Mutex;

use crate::cache::{CacheEntry, PersistentCache};
use crate::clock::{Clock, SystemClock};
use crate::model::Record;
use crate::mvi::Reducer;
use crate::source::{FetchError, RemoteSource};

use super::reducer::{StoreIntent, StoreReducer};
use super::state::{StoreSettings, StoreState};
use super::StoreError;

/// Shared handle to the collection store.
///
/// Clones share the same state. State mutations happen under a write lock
/// that is never held across an await, so every mutation is atomic with
/// respect to other tasks.
///
/// Full loads are numbered by a generation counter. A completion (or cache
/// write) whose generation is no longer current is discarded, which is how a
/// `retry` supersedes a load that is still in flight. Cache writes are
/// serialized and re-check the generation under that lock, so an older load
/// never lands its entry after a newer one.
#[derive(Clone)]
pub struct CollectionStore<R: Record> {
    inner: Arc<RwLock<StoreInner<R>>>,
    write_lock: Arc<Mutex<()>>,
    source: Arc<dyn RemoteSource<R>>,
    cache: Arc<dyn PersistentCache>,
    clock: Arc<dyn Clock>,
    settings: StoreSettings,
}

struct StoreInner<R: Record> {
    state: StoreState<R>,
    generation: u64,
}

impl<R: Record> StoreInner<R> {
    fn apply(&mut self, intent: StoreIntent<R>) {
        let state = std::mem::take(&mut self.state);
        self.state = StoreReducer::<R>::reduce(state, intent);
    }

    fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.apply(StoreIntent::LoadStarted);
        self.generation
    }
}

impl<R: Record> CollectionStore<R> {
    pub fn new(
        source: Arc<dyn RemoteSource<R>>,
        cache: Arc<dyn PersistentCache>,
        settings: StoreSettings,
    ) -> Result<Self, StoreError> {
        settings.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(StoreInner {
                state: StoreState::default(),
                generation: 0,
            })),
            write_lock: Arc::new(Mutex::new(())),
            source,
            cache,
            clock: Arc::new(SystemClock),
            settings,
        })
    }

    /// Replace the wall clock used for cache freshness.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> StoreState<R> {
        self.inner.read().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().state.loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.read().state.last_error.clone()
    }

    /// Resolve the collection (fresh cache first, network otherwise) and
    /// materialize its first page.
    ///
    /// Ignored while another load or page extension is in flight, so two
    /// rapid calls never produce two network fetches.
    pub async fn initial_load(&self) {
        let generation = {
            let mut inner = self.inner.write();
            if inner.state.loading {
                tracing::debug!("Load already in flight, ignoring");
                return;
            }
            inner.begin_load()
        };
        self.run_load(generation).await;
    }

    /// Clear the error and load again.
    ///
    /// Unlike [`initial_load`](Self::initial_load) this always starts a new
    /// load; a load still in flight is superseded and its result dropped.
    pub async fn retry(&self) {
        let generation = {
            let mut inner = self.inner.write();
            if inner.state.loading {
                tracing::info!(
                    superseded = inner.generation,
                    "Retry supersedes in-flight operation"
                );
            }
            inner.begin_load()
        };
        self.run_load(generation).await;
    }

    /// Append the next page from the cached collection.
    ///
    /// No-op while loading or when nothing is left. A missing or unreadable
    /// cache entry is not an error: the call simply changes nothing.
    pub async fn load_next_page(&self) {
        let (generation, cursor) = {
            let mut inner = self.inner.write();
            if inner.state.loading || !inner.state.has_more {
                return;
            }
            inner.apply(StoreIntent::PageStarted);
            (inner.generation, inner.state.page_cursor)
        };
        let _settle = self.settle_guard(generation);

        let Some(entry) = self.read_entry().await else {
            tracing::debug!("No cached collection, skipping page extension");
            self.commit(generation, StoreIntent::Settled);
            return;
        };

        let total = entry.records.len();
        let start = cursor.saturating_mul(self.settings.page_size);
        let end = start.saturating_add(self.settings.page_size);

        let intent = if start >= total {
            StoreIntent::Exhausted { total }
        } else {
            let records = entry
                .records
                .into_iter()
                .skip(start)
                .take(end.min(total) - start)
                .collect();
            StoreIntent::PageAppended {
                records,
                end,
                total,
            }
        };

        if self.commit(generation, intent) {
            tracing::debug!(page = cursor + 1, start, end = end.min(total), total, "Page appended");
        }
    }

    /// Set the search query and re-derive the view. No I/O.
    pub fn set_query(&self, query: impl Into<String>) {
        self.inner
            .write()
            .apply(StoreIntent::QueryChanged(query.into()));
    }

    /// Dismiss the error without retrying.
    pub fn clear_error(&self) {
        self.inner.write().apply(StoreIntent::ErrorCleared);
    }

    /// Flip the display preference and return the new value.
    pub fn toggle_display_mode(&self) -> bool {
        let mut inner = self.inner.write();
        inner.apply(StoreIntent::DisplayModeToggled);
        inner.state.dark_mode
    }

    /// Select a materialized record by id, or clear the selection.
    pub fn select(&self, id: Option<R::Id>) {
        self.inner.write().apply(StoreIntent::Selected(id));
    }

    pub fn selected(&self) -> Option<R> {
        let inner = self.inner.read();
        let id = inner.state.selected.as_ref()?;
        inner.state.all.iter().find(|r| &r.id() == id).cloned()
    }

    async fn run_load(&self, generation: u64) {
        let _settle = self.settle_guard(generation);

        let intent = match self.resolve_collection(generation).await {
            Ok(collection) => {
                let total = collection.len();
                let records = collection
                    .into_iter()
                    .take(self.settings.page_size)
                    .collect();
                StoreIntent::FirstPage { records, total }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load collection");
                StoreIntent::LoadFailed {
                    message: err.to_string(),
                }
            }
        };

        self.commit(generation, intent);
    }

    /// Cache-first resolution of the full collection.
    async fn resolve_collection(&self, generation: u64) -> Result<Vec<R>, FetchError> {
        if let Some(entry) = self.read_entry().await {
            let now = self.clock.now_millis();
            if entry.is_fresh(now, self.settings.cache_ttl_ms) {
                tracing::debug!(
                    age_ms = now.saturating_sub(entry.stored_at),
                    count = entry.records.len(),
                    "Serving collection from cache"
                );
                return Ok(entry.records);
            }
            tracing::debug!(
                age_ms = now.saturating_sub(entry.stored_at),
                "Cached collection is stale"
            );
        }

        let records = self.source.fetch_all().await?;
        let entry = CacheEntry::new(records, self.clock.now_millis());
        self.persist(generation, &entry).await;
        Ok(entry.records)
    }

    /// Read and decode the cache slot. Unreadable entries count as absent.
    async fn read_entry(&self) -> Option<CacheEntry<R>> {
        let key = &self.settings.cache_key;
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match CacheEntry::decode(&bytes) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "Ignoring unreadable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Cache read failed");
                None
            }
        }
    }

    /// Best-effort write. Failure keeps the fetched data usable in memory.
    async fn persist(&self, generation: u64, entry: &CacheEntry<R>) {
        let key = &self.settings.cache_key;
        let bytes = match entry.encode() {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Failed to encode cache entry");
                return;
            }
        };

        // Held across the write: a superseded load either finishes before the
        // newer one starts writing or sees the new generation and backs off.
        let _write = self.write_lock.lock().await;
        let current = self.inner.read().generation;
        if current != generation {
            tracing::debug!(generation, current, "Skipping cache write of superseded load");
            return;
        }
        if let Err(err) = self.cache.set(key, bytes).await {
            tracing::warn!(key = %key, error = %err, "Failed to persist collection");
        }
    }

    /// Apply `intent` if `generation` is still current.
    fn commit(&self, generation: u64, intent: StoreIntent<R>) -> bool {
        let mut inner = self.inner.write();
        if inner.generation != generation {
            tracing::debug!(
                generation,
                current = inner.generation,
                "Discarding stale completion"
            );
            return false;
        }
        inner.apply(intent);
        true
    }

    /// Clears `loading` when the operation ends by any path, including the
    /// future being dropped, unless a newer generation has taken over.
    fn settle_guard(&self, generation: u64) -> ScopeGuard<(), impl FnOnce(())> {
        let inner = Arc::clone(&self.inner);
        scopeguard::guard((), move |_| {
            let mut inner = inner.write();
            if inner.generation == generation && inner.state.loading {
                inner.apply(StoreIntent::Settled);
            }
        })
    }
}
