//! Time-bounded response cache shared across requests.
//!
//! A mapping from cache key to `(payload, created_at)` with a fixed
//! time-to-live. Entries expire logically at read time; nothing is evicted
//! proactively. A write replaces the whole entry for its key, so a reader
//! can never observe a torn entry, and the last writer for a key wins.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

/// TTL used in production: cached payloads are reused for ten minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: String,
    created_at: Instant,
}

/// A shared payload cache with read-time TTL checks.
///
/// The lock is held only for the map operation itself; callers fetch fresh
/// payloads outside the lock and write them back afterwards.
///
/// # Examples
///
/// ```
/// use minihttpd::cache::ResponseCache;
/// use tokio::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache = ResponseCache::new(Duration::from_secs(600));
/// cache.insert("paris_metric", r#"{"main":{"temp":20}}"#).await;
/// assert!(cache.get_fresh("paris_metric").await.is_some());
/// assert!(cache.get_fresh("rome_metric").await.is_none());
/// # }
/// ```
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates an empty cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the payload for `key` when an entry exists and is younger
    /// than the TTL. Stale entries are left in place; the next `insert`
    /// replaces them wholesale.
    pub async fn get_fresh(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.created_at.elapsed() < self.ttl)
            .map(|entry| entry.payload.clone())
    }

    /// Stores `payload` under `key`, unconditionally replacing any existing
    /// entry and resetting its age.
    pub async fn insert(&self, key: impl Into<String>, payload: impl Into<String>) {
        let entry = CacheEntry {
            payload: payload.into(),
            created_at: Instant::now(),
        };
        self.entries.write().await.insert(key.into(), entry);
    }
}
