use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

/// Per-provider memo cache.
///
/// Holds positive values and explicit "not found" markers for the lifetime
/// of the owning provider instance. Concurrent fetches of the same uncached
/// key are coalesced: one underlying request runs, every waiting caller gets
/// its result. Transient fetch errors are never cached, so the next caller
/// retries.
pub struct MemoCache<V> {
    entries: Mutex<HashMap<String, Option<V>>>,
    inflight: Mutex<HashMap<String, Arc<OnceCell<Option<V>>>>>,
}

impl<V: Clone> MemoCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Cached result, if any. `Some(None)` is a cached definitive miss.
    pub async fn peek(&self, key: &str) -> Option<Option<V>> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn insert(&self, key: &str, value: Option<V>) {
        self.entries.lock().await.insert(key.to_string(), value);
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Resolve `key` through the cache, running `fetch` at most once per
    /// uncached key even under concurrent callers. `Ok(None)` is cached as a
    /// definitive miss; `Err` leaves the key uncached.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: &str, fetch: F) -> Result<Option<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<V>, E>>,
    {
        if let Some(hit) = self.peek(key).await {
            return Ok(hit);
        }

        let cell = {
            let mut inflight = self.inflight.lock().await;
            inflight.entry(key.to_string()).or_default().clone()
        };

        let outcome = cell
            .get_or_try_init(|| async {
                let value = fetch().await?;
                self.insert(key, value.clone()).await;
                Ok(value)
            })
            .await
            .map(|value| value.clone());

        // The slot is only needed while the request is in flight; later
        // callers hit `entries` directly.
        self.inflight.lock().await.remove(key);

        outcome
    }
}

impl<V: Clone> Default for MemoCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
