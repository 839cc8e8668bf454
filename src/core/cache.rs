//! In-memory TTL cache with single-flight request de-duplication.
//!
//! Concurrent callers asking for the same key while a fetch is in flight join that fetch
//! instead of issuing a second one. Successful results are kept until their TTL elapses;
//! failures are handed to every joiner and never cached.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;
use tokio::time::Instant;

type SharedFetch<V, E> = Shared<BoxFuture<'static, Result<V, E>>>;

struct CacheEntry<V> {
    data: V,
    expires_at: Instant,
}

struct PendingFetch<V, E> {
    id: u64,
    future: SharedFetch<V, E>,
}

struct CacheState<V, E> {
    entries: HashMap<String, CacheEntry<V>>,
    pending: HashMap<String, PendingFetch<V, E>>,
    // Bumped by `clear()`; fetches started under an older generation do not write back.
    generation: u64,
    next_fetch_id: u64,
}

/// A keyed cache whose misses are resolved by caller-supplied fetchers.
///
/// `V` is the cached value and `E` the fetch error; both are cloned out to every joiner,
/// so wrap non-`Clone` errors in an `Arc`.
pub struct RequestCache<V, E> {
    state: Arc<Mutex<CacheState<V, E>>>,
}

impl<V, E> Clone for RequestCache<V, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<V, E> std::fmt::Debug for RequestCache<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCache").finish_non_exhaustive()
    }
}

impl<V, E> Default for RequestCache<V, E> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState {
                entries: HashMap::new(),
                pending: HashMap::new(),
                generation: 0,
                next_fetch_id: 0,
            })),
        }
    }
}

impl<V, E> RequestCache<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live entry for `key`, joins the in-flight fetch for `key`, or starts one.
    ///
    /// `fetcher` is only called when neither a live entry nor a pending fetch exists. On success
    /// the value is stored for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, unchanged, to every caller that joined the fetch.
    pub async fn get<F, Fut>(&self, key: &str, ttl: Duration, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        self.resolve(key, ttl, fetcher, true).await
    }

    /// Like [`get`](Self::get), but ignores a live entry. The fresh result replaces it.
    ///
    /// A fetch that is already in flight is still joined.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, unchanged.
    pub async fn refresh<F, Fut>(&self, key: &str, ttl: Duration, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        self.resolve(key, ttl, fetcher, false).await
    }

    async fn resolve<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetcher: F,
        read_entry: bool,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let fetch = {
            let mut state = self.state.lock().await;

            if read_entry && let Some(entry) = state.entries.get(key) {
                if Instant::now() < entry.expires_at {
                    return Ok(entry.data.clone());
                }
                state.entries.remove(key);
            }

            if let Some(pending) = state.pending.get(key) {
                pending.future.clone()
            } else {
                let id = state.next_fetch_id;
                state.next_fetch_id += 1;
                let future = settle(
                    Arc::downgrade(&self.state),
                    key.to_string(),
                    id,
                    state.generation,
                    ttl,
                    fetcher(),
                );
                state.pending.insert(
                    key.to_string(),
                    PendingFetch {
                        id,
                        future: future.clone(),
                    },
                );
                future
            }
        };

        fetch.await
    }

    /// Drops the entry for `key`. An in-flight fetch for `key` is not affected.
    pub async fn delete(&self, key: &str) -> bool {
        self.state.lock().await.entries.remove(key).is_some()
    }

    /// Drops `path` and every query variant of it (`path?...`). Returns how many entries went.
    pub async fn delete_route(&self, path: &str) -> usize {
        let mut state = self.state.lock().await;
        let before = state.entries.len();
        state.entries.retain(|k, _| {
            let route = k.split_once('?').map_or(k.as_str(), |(p, _)| p);
            route != path
        });
        before - state.entries.len()
    }

    /// Drops every entry and forgets in-flight fetches; their results will not be stored.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.pending.clear();
        state.generation += 1;
    }

    /// Whether a live entry exists for `key`.
    pub async fn contains(&self, key: &str) -> bool {
        let state = self.state.lock().await;
        state
            .entries
            .get(key)
            .is_some_and(|e| Instant::now() < e.expires_at)
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let state = self.state.lock().await;
        state.entries.values().filter(|e| now < e.expires_at).count()
    }

    /// Whether there are no live entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of fetches currently in flight.
    pub async fn pending(&self) -> usize {
        self.state.lock().await.pending.len()
    }
}

fn settle<V, E, Fut>(
    state: Weak<Mutex<CacheState<V, E>>>,
    key: String,
    id: u64,
    generation: u64,
    ttl: Duration,
    fetch: Fut,
) -> SharedFetch<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<V, E>> + Send + 'static,
{
    async move {
        let result = fetch.await;
        if let Some(state) = state.upgrade() {
            let mut state = state.lock().await;
            if state.pending.get(&key).is_some_and(|p| p.id == id) {
                state.pending.remove(&key);
            }
            if state.generation == generation
                && let Ok(data) = &result
            {
                state.entries.insert(
                    key,
                    CacheEntry {
                        data: data.clone(),
                        expires_at: Instant::now() + ttl,
                    },
                );
            }
        }
        result
    }
    .boxed()
    .shared()
}
