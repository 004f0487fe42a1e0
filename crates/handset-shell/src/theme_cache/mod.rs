//! Per-domain theme color cache.
//!
//! Remembers the last theme color seen for each domain so a tab can be
//! painted before its page reports a color. Bounded LRU by timestamp; writes
//! to disk are debounced and driven by [`ThemeColorCache::tick`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use handset_config::schema::ThemeCacheConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

mod persist;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub color: String,
    /// Milliseconds since the Unix epoch; strictly increasing across writes.
    pub timestamp: i64,
}

#[derive(Debug)]
pub struct ThemeColorCache {
    entries: HashMap<String, CacheEntry>,
    capacity: usize,
    debounce: Duration,
    path: Option<PathBuf>,
    flush_at: Option<Instant>,
    dirty: bool,
    last_stamp: i64,
}

impl ThemeColorCache {
    /// Empty cache that never touches disk.
    pub fn new(capacity: usize, debounce: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            debounce,
            path: None,
            flush_at: None,
            dirty: false,
            last_stamp: 0,
        }
    }

    /// Load from `path`. A missing or unreadable file yields an empty cache.
    pub fn load(path: impl Into<PathBuf>, capacity: usize, debounce: Duration) -> Self {
        let path = path.into();
        let mut cache = Self::new(capacity, debounce);

        match persist::read(&path) {
            Ok(Some(entries)) => {
                cache.last_stamp = entries.values().map(|e| e.timestamp).max().unwrap_or(0);
                cache.entries = entries;
                cache.trim_to_capacity();
                debug!(path = %path.display(), entries = cache.entries.len(), "theme cache loaded");
            }
            Ok(None) => debug!(path = %path.display(), "no theme cache on disk"),
            Err(e) => warn!(error = %e, "theme cache unreadable, starting empty"),
        }

        cache.path = Some(path);
        cache
    }

    pub fn from_config(path: impl Into<PathBuf>, config: &ThemeCacheConfig) -> Self {
        Self::load(
            path,
            config.capacity as usize,
            Duration::from_millis(config.debounce_ms),
        )
    }

    /// Insert or update `domain`. Evicts the oldest entry when full.
    pub fn set(&mut self, domain: &str, color: &str, now: Instant) {
        let timestamp = self.next_stamp();

        if !self.entries.contains_key(domain) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        self.entries.insert(
            domain.to_string(),
            CacheEntry {
                color: color.to_string(),
                timestamp,
            },
        );
        self.schedule(now);
    }

    /// Cached color for `domain`. A hit refreshes its timestamp; the refresh
    /// is persisted with the next write.
    pub fn get(&mut self, domain: &str) -> Option<String> {
        if !self.entries.contains_key(domain) {
            return None;
        }
        let timestamp = self.next_stamp();
        let entry = self.entries.get_mut(domain)?;
        entry.timestamp = timestamp;
        self.dirty = true;
        Some(entry.color.clone())
    }

    /// Read without refreshing.
    pub fn peek(&self, domain: &str) -> Option<&CacheEntry> {
        self.entries.get(domain)
    }

    pub fn clear(&mut self, now: Instant) {
        self.entries.clear();
        self.schedule(now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// When the pending write is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.flush_at
    }

    /// Write to disk if the debounce deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.flush_at.is_some_and(|at| at <= now) {
            self.flush();
        }
    }

    /// Write immediately and cancel any pending write. Failures are logged.
    pub fn flush(&mut self) {
        self.flush_at = None;
        let Some(path) = &self.path else {
            self.dirty = false;
            return;
        };
        match persist::write(path, &self.entries) {
            Ok(()) => {
                self.dirty = false;
                debug!(path = %path.display(), entries = self.entries.len(), "theme cache written");
            }
            Err(e) => warn!(error = %e, "failed to persist theme cache"),
        }
    }

    /// Unconditional write used at shutdown.
    pub fn shutdown(&mut self) {
        self.flush();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn schedule(&mut self, now: Instant) {
        self.dirty = true;
        self.flush_at = Some(now + self.debounce);
    }

    fn next_stamp(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_stamp = now.max(self.last_stamp + 1);
        self.last_stamp
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.timestamp)
            .map(|(domain, _)| domain.clone());
        if let Some(domain) = oldest {
            debug!(domain = %domain, "theme cache eviction");
            self.entries.remove(&domain);
        }
    }

    fn trim_to_capacity(&mut self) {
        while self.entries.len() > self.capacity {
            self.evict_oldest();
        }
    }
}
