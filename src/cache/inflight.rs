//! Registry of in-flight requests, used to coalesce identical concurrent calls
//!
//! At most one network call is pending per fingerprint. Every caller that
//! arrives while it is pending awaits the same shared outcome.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, Shared};

use crate::client::envelope::Payload;
use crate::error::ApiError;

/// Outcome shared by every caller of one in-flight request
pub type SharedResponse = Shared<BoxFuture<'static, Result<Payload, ApiError>>>;

struct Pending {
    id: u64,
    response: SharedResponse,
}

/// What happened when a caller asked to be admitted for a key
pub enum Admission {
    /// A fresh cached payload was found; no request needed
    Cached(Payload),
    /// Another caller's request is pending; await its outcome
    Joined(SharedResponse),
    /// This caller started the request
    Started(SharedResponse),
}

/// Process-wide map of fingerprint to pending request
#[derive(Default)]
pub struct InflightRegistry {
    pending: Mutex<HashMap<String, Pending>>,
    next_id: AtomicU64,
}

impl InflightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<String, Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pending outcome for `key`, if a request is in flight.
    pub fn lookup(&self, key: &str) -> Option<SharedResponse> {
        self.pending().get(key).map(|p| p.response.clone())
    }

    /// Record a pending request under `key` and return its registration id.
    ///
    /// The caller must have checked that nothing is pending for `key`.
    pub fn register(&self, key: &str, response: SharedResponse) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let previous = self
            .pending()
            .insert(key.to_string(), Pending { id, response });
        debug_assert!(previous.is_none(), "request already in flight for {key}");
        id
    }

    /// Remove the registration `id` for `key`.
    ///
    /// A stale id never removes a newer registration of the same key.
    pub fn unregister(&self, key: &str, id: u64) -> bool {
        let mut pending = self.pending();
        match pending.get(key) {
            Some(p) if p.id == id => {
                pending.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Atomically check the cache, join a pending request, or start one.
    ///
    /// The registry lock is held for the whole check-then-register sequence,
    /// so two callers can never both start a request for the same key.
    /// `start` receives the id the new request will be registered under.
    pub fn admit<C, S>(&self, key: &str, cached: C, start: S) -> Admission
    where
        C: FnOnce() -> Option<Payload>,
        S: FnOnce(u64) -> SharedResponse,
    {
        let mut pending = self.pending();

        if let Some(payload) = cached() {
            return Admission::Cached(payload);
        }

        if let Some(p) = pending.get(key) {
            return Admission::Joined(p.response.clone());
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let response = start(id);
        pending.insert(
            key.to_string(),
            Pending {
                id,
                response: response.clone(),
            },
        );
        Admission::Started(response)
    }

    pub fn len(&self) -> usize {
        self.pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys with a request currently in flight.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.pending().keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Unregisters a pending request when the task driving it finishes,
/// whether it succeeded, failed or panicked.
pub struct PendingGuard {
    registry: Arc<InflightRegistry>,
    key: String,
    id: u64,
}

impl PendingGuard {
    pub fn new(registry: Arc<InflightRegistry>, key: String, id: u64) -> Self {
        Self { registry, key, id }
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.registry.unregister(&self.key, self.id) {
            log::debug!("Request settled: {}", self.key);
        }
    }
}
