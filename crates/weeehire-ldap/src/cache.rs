//! Shared key/value cache used for directory reads
//!
//! The gateway only needs two operations, `fetch` and `store`. Stores are
//! shared by handing the same `Arc<dyn CacheStore>` to every gateway.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// A process-wide key/value store with per-key expiry.
///
/// `fetch` and `store` must be atomic for a single key. Values are replaced
/// wholesale, so concurrent writers racing on one key is harmless.
pub trait CacheStore: Send + Sync {
    /// Whether the store can be used at all. Checked once per gateway.
    fn is_available(&self) -> bool {
        true
    }

    /// Get a non-expired value
    fn fetch(&self, key: &str) -> Option<Value>;

    /// Insert or replace a value, expiring after `ttl`
    fn store(&self, key: &str, value: Value, ttl: Duration);
}

/// Time source for cache expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock()
    }
}

struct CachedValue {
    value: Value,
    expires_at: Instant,
}

/// In-process cache store
pub struct MemoryCache {
    enabled: bool,
    entries: Mutex<HashMap<String, CachedValue>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            enabled: true,
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// A store that reports itself unavailable, for deployments without a
    /// shared cache
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for MemoryCache {
    fn is_available(&self) -> bool {
        self.enabled
    }

    fn fetch(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(cached) if now < cached.expires_at => Some(cached.value.clone()),
            Some(_) => {
                debug!(key, "Cache entry expired");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn store(&self, key: &str, value: Value, ttl: Duration) {
        let expires_at = self.clock.now() + ttl;
        self.entries
            .lock()
            .insert(key.to_string(), CachedValue { value, expires_at });
    }
}
