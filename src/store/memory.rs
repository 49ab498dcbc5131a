//! Memory Store Module
//!
//! The cache engine: a key-to-entry map with TTL visibility checks and the
//! policy-dependent reclamation of expired entries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::config::CleanupPolicy;
use crate::logger::Logger;
use crate::store::Entry;

// == Memory Store ==
/// In-memory mapping from key to [`Entry`], with at most one entry per
/// key.
///
/// The store itself is not synchronized; share it behind a lock (the
/// [`Cache`](crate::Cache) facade wraps it in `Arc<RwLock<..>>`). The
/// cleanup policy is fixed at construction and decides only whether an
/// expired entry is physically removed; an expired entry is never visible
/// to a read under any policy.
#[derive(Debug)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, Entry>,
    /// Reclamation policy, fixed for the store's lifetime
    policy: CleanupPolicy,
    /// Sink for cleanup diagnostics
    logger: Arc<dyn Logger>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store with the given policy.
    pub fn new(policy: CleanupPolicy, logger: Arc<dyn Logger>) -> Self {
        Self::with_capacity(policy, 0, logger)
    }

    /// Creates an empty store pre-sized for `capacity` entries.
    pub fn with_capacity(policy: CleanupPolicy, capacity: usize, logger: Arc<dyn Logger>) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            policy,
            logger,
        }
    }

    /// The reclamation policy this store was built with.
    pub fn policy(&self) -> CleanupPolicy {
        self.policy
    }

    // == Set ==
    /// Inserts or unconditionally overwrites the entry for `key`.
    ///
    /// Always succeeds; a previous entry for the key is discarded without
    /// notice. Keys compare by exact byte equality, no normalization.
    pub fn set(&mut self, key: String, value: Vec<u8>, expires_at: Instant) {
        self.entries.insert(key, Entry::new(value, expires_at));
    }

    // == Get ==
    /// Policy-aware read.
    ///
    /// Returns the value only while the entry's expiration lies strictly
    /// in the future. Under the `lazy` policy an expired entry is removed
    /// as a side effect of the read and one diagnostic line naming the
    /// key is emitted; under `active` and `none` the read never mutates
    /// the store.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired && self.policy == CleanupPolicy::Lazy {
            self.entries.remove(key);
            self.logger
                .printf(format_args!("lazy cleanup: expired entry removed: {key}"));
        }
        None
    }

    // == Peek ==
    /// The same visibility decision as [`get`](Self::get) with no
    /// reclamation side effect under any policy.
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes the entry for `key` if present; silently does nothing
    /// otherwise.
    pub fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    // == Purge Expired ==
    /// Removes every entry whose expiration is at or before `deadline`
    /// and returns how many were removed.
    ///
    /// One full pass over the map, O(live entries); the background
    /// sweeper calls this once per tick with the pass's start time as the
    /// deadline. Each removal emits one diagnostic line naming the key.
    pub fn purge_expired(&mut self, deadline: Instant) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(deadline))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.logger
                .printf(format_args!("active cleanup: expired entry removed: {key}"));
        }

        count
    }

    // == Physical Inspection ==
    /// Number of entries physically present, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are physically present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry for `key` is physically present, regardless of
    /// expiry. Reads should use [`get`](Self::get) or
    /// [`peek`](Self::peek); this exists to observe retention.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
