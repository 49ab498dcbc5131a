//! Cache Facade Module
//!
//! The public handle over the shared entry store: async set/get/delete,
//! TTL defaulting, and ownership of the background cleanup sweeper.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::{CleanupPolicy, Config};
use crate::logger::{Logger, TracingLogger};
use crate::store::{Entry, MemoryStore};
use crate::tasks::{spawn_sweeper, SweeperHandle};

// == Sweeper Slot ==
/// Shared slot holding the sweeper handle, if one is running.
///
/// Lives behind the same `Arc` as the cache clones; when the last clone
/// drops, any still-running sweeper is aborted so the task cannot outlive
/// every handle to the store it sweeps.
#[derive(Debug, Default)]
struct SweeperSlot {
    handle: Mutex<Option<SweeperHandle>>,
}

impl SweeperSlot {
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<SweeperHandle>> {
        // A poisoned lock only means a panic elsewhere; the slot content
        // is still a valid Option
        self.handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for SweeperSlot {
    fn drop(&mut self) {
        let slot = self
            .handle
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

// == Cache ==
/// Cloneable cache handle backed by a shared in-memory store.
///
/// All clones see the same entries. Reads and writes go through one
/// `RwLock`; the cleanup policy chosen at construction decides how
/// expired entries are physically reclaimed.
#[derive(Debug, Clone)]
pub struct Cache {
    store: Arc<RwLock<MemoryStore>>,
    config: Config,
    sweeper: Arc<SweeperSlot>,
}

impl Cache {
    // == Constructors ==
    /// Creates a cache from a resolved configuration, logging cleanup
    /// activity through `tracing`.
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, Arc::new(TracingLogger))
    }

    /// Creates a cache with an explicit logger for cleanup diagnostics.
    ///
    /// # Arguments
    /// * `config` - resolved configuration
    /// * `logger` - sink for per-entry cleanup lines
    pub fn with_logger(config: Config, logger: Arc<dyn Logger>) -> Self {
        let store =
            MemoryStore::with_capacity(config.cleanup_policy, config.initial_capacity, logger);
        Self {
            store: Arc::new(RwLock::new(store)),
            config,
            sweeper: Arc::new(SweeperSlot::default()),
        }
    }

    // == Set ==
    /// Stores a key-value pair with an optional TTL.
    ///
    /// If the key already exists, the value is overwritten and the
    /// expiration is reset. `None` applies the configured default TTL.
    /// A TTL too large for the platform clock saturates to a far-future
    /// deadline rather than failing the call.
    ///
    /// # Arguments
    /// * `key` - the key to store
    /// * `value` - the value bytes to store
    /// * `ttl` - time to live (uses `config.default_ttl` if None)
    pub async fn set(&self, key: String, value: Vec<u8>, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.config.default_ttl);
        let expires_at = Entry::expiry_after(ttl);
        self.store.write().await.set(key, value, expires_at);
    }

    /// Stores a key-value pair expiring at an absolute instant.
    ///
    /// An instant at or before now stores an entry that is already
    /// expired, which is useful for handing cleanup work to the policy.
    pub async fn set_until(&self, key: String, value: Vec<u8>, expires_at: Instant) {
        self.store.write().await.set(key, value, expires_at);
    }

    // == Get ==
    /// Retrieves the value for a key, or `None` if the key is absent or
    /// its entry has expired.
    ///
    /// Under the `Lazy` policy the read takes the exclusive lock so an
    /// expired entry can be checked and removed in one step. The other
    /// policies read under the shared lock and never mutate.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.config.cleanup_policy {
            CleanupPolicy::Lazy => self.store.write().await.get(key),
            CleanupPolicy::Active | CleanupPolicy::None => self.store.read().await.peek(key),
        }
    }

    // == Delete ==
    /// Removes a key immediately, regardless of expiration state.
    /// Deleting an absent key is a no-op.
    pub async fn delete(&self, key: &str) {
        self.store.write().await.delete(key);
    }

    // == Cleanup Control ==
    /// Starts the background sweeper with the given pass interval.
    ///
    /// Only the `Active` policy sweeps; under `Lazy` and `None` this
    /// logs and returns `false`. Calling it while a sweeper is already
    /// running is a no-op returning `false`, so repeated calls never
    /// stack tasks. A zero interval is refused.
    ///
    /// # Returns
    /// `true` if a sweeper was started by this call.
    pub async fn start_cleanup(&self, interval: Duration) -> bool {
        if self.config.cleanup_policy != CleanupPolicy::Active {
            debug!(
                "cleanup sweeper not started: policy is {}",
                self.config.cleanup_policy
            );
            return false;
        }
        if interval.is_zero() {
            warn!("cleanup sweeper not started: interval must be nonzero");
            return false;
        }

        let mut slot = self.sweeper.lock();
        match slot.as_ref() {
            Some(handle) if !handle.is_finished() => false,
            _ => {
                *slot = Some(spawn_sweeper(self.store.clone(), interval));
                true
            }
        }
    }

    /// Stops the background sweeper, if one is running, and waits for it
    /// to finish. The sweeper can be started again afterwards.
    pub async fn stop_cleanup(&self) {
        // Take the handle out first; the slot lock must not be held
        // across the await
        let handle = self.sweeper.lock().take();
        if let Some(handle) = handle {
            handle.stop().await;
        }
    }

    // == Inspection ==
    /// Number of physically stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true when no entries are physically stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// The configuration this cache was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The cleanup policy this cache runs under.
    pub fn policy(&self) -> CleanupPolicy {
        self.config.cleanup_policy
    }
}
