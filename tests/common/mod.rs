//! Shared test utilities and mock collaborators.

#![allow(dead_code, unused_imports)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use roster::cache::{CacheEntry, CacheError, MemoryCache, PersistentCache};
use roster::clock::ManualClock;
use roster::model::User;
use roster::source::{FetchError, RemoteSource};
use roster::store::{CollectionStore, StoreSettings};

pub const KEY: &str = "users_cache";
pub const TTL: u64 = 300_000;
/// Arbitrary fixed "now" for the manual clock.
pub const NOW: u64 = 1_700_000_000_000;

/// `n` users named "User 1".."User n".
pub fn users(n: u64) -> Vec<User> {
    (1..=n)
        .map(|i| User::sample(i, &format!("User {}", i), &format!("user{}@example.com", i)))
        .collect()
}

pub fn ids(records: &[User]) -> Vec<u64> {
    records.iter().map(|u| u.id).collect()
}

struct Scripted {
    result: Result<Vec<User>, FetchError>,
    gate: Option<Arc<Semaphore>>,
}

/// Remote source returning canned results and counting calls.
///
/// Scripted responses are consumed first, in order; afterwards every call
/// gets the default response.
pub struct MockSource {
    default: Mutex<Result<Vec<User>, FetchError>>,
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn ok(records: Vec<User>) -> Arc<Self> {
        Self::with(Ok(records))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::with(Err(FetchError::Transport(message.to_string())))
    }

    fn with(result: Result<Vec<User>, FetchError>) -> Arc<Self> {
        Arc::new(Self {
            default: Mutex::new(result),
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_default(&self, result: Result<Vec<User>, FetchError>) {
        *self.default.lock() = result;
    }

    /// Queue a response that is held back until the returned semaphore
    /// receives a permit.
    pub fn push_gated(&self, result: Result<Vec<User>, FetchError>) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.script.lock().push_back(Scripted {
            result,
            gate: Some(gate.clone()),
        });
        gate
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Poll until at least `n` calls have started.
    pub async fn wait_for_calls(&self, n: usize) -> bool {
        let start = std::time::Instant::now();
        while start.elapsed() < Duration::from_secs(2) {
            if self.calls() >= n {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        false
    }
}

#[async_trait]
impl RemoteSource<User> for MockSource {
    async fn fetch_all(&self) -> Result<Vec<User>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.script.lock().pop_front();
        match scripted {
            Some(Scripted { result, gate }) => {
                if let Some(gate) = gate {
                    let permit = gate.acquire().await.expect("gate closed");
                    permit.forget();
                }
                result
            }
            None => self.default.lock().clone(),
        }
    }
}

/// Memory cache with switchable read/write failures and call counters.
#[derive(Default)]
pub struct MockCache {
    inner: MemoryCache,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    set_gate: Mutex<Option<Arc<Semaphore>>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl MockCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store `records` under [`KEY`] stamped `stored_at`.
    pub async fn seed(&self, records: Vec<User>, stored_at: u64) {
        let bytes = CacheEntry::new(records, stored_at).encode().unwrap();
        self.inner.set(KEY, bytes).await.unwrap();
    }

    pub async fn seed_raw(&self, bytes: &[u8]) {
        self.inner.set(KEY, bytes.to_vec()).await.unwrap();
    }

    pub async fn entry(&self) -> Option<CacheEntry<User>> {
        let bytes = self.inner.get(KEY).await.unwrap()?;
        Some(CacheEntry::decode(&bytes).unwrap())
    }

    pub fn clear(&self) {
        self.inner.remove(KEY);
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Hold the next `set` back until the returned semaphore receives a
    /// permit.
    pub fn gate_next_set(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.set_gate.lock() = Some(gate.clone());
        gate
    }

    /// Poll until at least `n` writes have started.
    pub async fn wait_for_sets(&self, n: usize) -> bool {
        let start = std::time::Instant::now();
        while start.elapsed() < Duration::from_secs(2) {
            if self.sets() >= n {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        false
    }
}

#[async_trait]
impl PersistentCache for MockCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("read failed".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        let gate = self.set_gate.lock().take();
        if let Some(gate) = gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("disk full".to_string()));
        }
        self.inner.set(key, bytes).await
    }
}

pub struct Harness {
    pub store: CollectionStore<User>,
    pub source: Arc<MockSource>,
    pub cache: Arc<MockCache>,
    pub clock: Arc<ManualClock>,
}

/// Store with default settings (page size 8, TTL 5 min) over the given mocks.
pub fn harness(source: Arc<MockSource>, cache: Arc<MockCache>) -> Harness {
    let clock = Arc::new(ManualClock::new(NOW));
    let store = CollectionStore::new(source.clone(), cache.clone(), StoreSettings::default())
        .unwrap()
        .with_clock(clock.clone());
    Harness {
        store,
        source,
        cache,
        clock,
    }
}
