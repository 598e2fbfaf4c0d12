//! In-memory response cache with lazy, read-time expiration
//!
//! Entries are never swept in the background. A stale entry is only removed
//! when it is next read, or by an explicit clear.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::client::envelope::Payload;

/// A cached response body and its freshness window
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Payload,
    pub stored_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    /// Valid while `now - stored_at <= ttl`.
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) <= self.ttl
    }
}

/// Read-only view of one cache entry for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntrySnapshot {
    pub key: String,
    pub age_ms: u64,
    pub ttl_ms: u64,
    pub expired: bool,
}

/// Statistics about cache state
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
}

/// Process-wide response cache keyed by request fingerprint.
///
/// Shared across tasks behind a mutex; no lock is ever held across an await.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a payload, replacing any entry under the same key.
    pub fn put(&self, key: &str, payload: Payload, ttl: Duration) {
        self.put_at(key, payload, ttl, Instant::now());
    }

    pub(crate) fn put_at(&self, key: &str, payload: Payload, ttl: Duration, stored_at: Instant) {
        self.entries().insert(
            key.to_string(),
            CacheEntry {
                payload,
                stored_at,
                ttl,
            },
        );
    }

    /// Get a fresh payload, evicting the entry if it has gone stale.
    pub fn get(&self, key: &str) -> Option<Payload> {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<Payload> {
        let mut entries = self.entries();
        let fresh = entries.get(key)?.is_fresh_at(now);

        if fresh {
            entries.get(key).map(|e| e.payload.clone())
        } else {
            log::debug!("Cache entry expired: {}", key);
            entries.remove(key);
            None
        }
    }

    /// Remove a single entry. Returns whether it existed.
    pub fn delete(&self, key: &str) -> bool {
        self.entries().remove(key).is_some()
    }

    /// Remove all entries. Returns the number removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries();
        let count = entries.len();
        entries.clear();
        count
    }

    /// Remove every entry whose key contains `pattern`.
    ///
    /// Linear scan; the cache holds at most a few hundred keys.
    pub fn clear_by_prefix(&self, pattern: &str) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, _| !key.contains(pattern));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-key age, TTL and expiry flag. Never evicts.
    pub fn snapshot(&self) -> Vec<CacheEntrySnapshot> {
        self.snapshot_at(Instant::now())
    }

    pub(crate) fn snapshot_at(&self, now: Instant) -> Vec<CacheEntrySnapshot> {
        let entries = self.entries();
        let mut snapshot: Vec<CacheEntrySnapshot> = entries
            .iter()
            .map(|(key, entry)| CacheEntrySnapshot {
                key: key.clone(),
                age_ms: now.saturating_duration_since(entry.stored_at).as_millis() as u64,
                ttl_ms: entry.ttl.as_millis() as u64,
                expired: !entry.is_fresh_at(now),
            })
            .collect();
        snapshot.sort_by(|a, b| a.key.cmp(&b.key));
        snapshot
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let snapshot = self.snapshot();
        let expired_entries = snapshot.iter().filter(|e| e.expired).count();
        CacheStats {
            total_entries: snapshot.len(),
            valid_entries: snapshot.len() - expired_entries,
            expired_entries,
        }
    }
}
