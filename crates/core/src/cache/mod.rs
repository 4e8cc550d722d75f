//! In-memory LRU cache for HTTP response bodies.
//!
//! A bounded key/value store with access-order eviction. `get` promotes the
//! entry to most-recently-used; `put` overwrites, refreshes the timestamp,
//! and evicts the least-recently-used entry when capacity is exceeded.
//!
//! The cache is deliberately not persisted: it exists to absorb repeat
//! fetches within one server process, nothing more.

mod key;

pub use key::compute_cache_key;

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};

/// Default number of entries retained before eviction kicks in.
pub const DEFAULT_CAPACITY: usize = 64;

struct Entry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

/// Bounded least-recently-used cache.
///
/// Recency order lives in `order` (front = least recently used); `entries`
/// holds the values. Capacity is fixed at construction and never shrinks an
/// existing cache below its current size except through normal eviction.
pub struct LruCache<V> {
    capacity: usize,
    entries: HashMap<String, Entry<V>>,
    order: VecDeque<String>,
}

impl<V: Clone> LruCache<V> {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::with_capacity(capacity.max(1)),
            order: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Look up a key, promoting it to most-recently-used on a hit.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if !self.entries.contains_key(key) {
            return None;
        }
        self.touch(key);
        self.entries.get(key).map(|e| e.value.clone())
    }

    /// Insert or overwrite a key, refreshing its timestamp and recency.
    ///
    /// Evicts the least-recently-used entry when the insert pushes the cache
    /// past capacity. Always succeeds.
    pub fn put(&mut self, key: String, value: V) {
        if self.entries.contains_key(&key) {
            self.touch(&key);
        } else {
            self.order.push_back(key.clone());
        }
        self.entries.insert(key, Entry { value, inserted_at: Utc::now() });

        if self.entries.len() > self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            tracing::trace!("evicting least-recently-used cache entry {}", oldest);
            self.entries.remove(&oldest);
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Timestamp of the entry's last insert/overwrite, if present.
    ///
    /// Reads do not refresh the timestamp, only the recency order.
    pub fn inserted_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|e| e.inserted_at)
    }

    /// Move `key` to the most-recently-used position.
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key.to_string());
    }
}

impl<V: Clone> Default for LruCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
