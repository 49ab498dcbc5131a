//! TTL Cleanup Sweeper
//!
//! Background task that periodically removes expired cache entries. Only
//! the `Active` cleanup policy runs a sweeper; the facade in `cache.rs`
//! enforces that and owns the handle returned from here.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Handle to a running sweeper task.
///
/// Holds the stop signal and the join handle together so the task's
/// lifetime is owned by whoever holds this value. Dropping the handle
/// closes the signal channel, which also terminates the task on its next
/// wakeup.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the sweeper to stop and waits for it to finish.
    pub async fn stop(self) {
        // The task may have exited already, so a failed send is fine
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }

    /// Aborts the sweeper immediately without waiting.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Returns true once the sweeper task has terminated.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns a background task that periodically purges expired entries.
///
/// The task sleeps for `interval` between passes. Each pass acquires the
/// write lock once, removes every entry expired at the pass's start
/// instant, then releases the lock and logs a summary. Entries that
/// expire while a pass is scanning are collected by the next pass.
///
/// # Arguments
/// * `store` - shared reference to the entry store
/// * `interval` - time between cleanup passes
///
/// # Returns
/// A [`SweeperHandle`] that stops the task gracefully via `stop()` or
/// immediately via `abort()`.
pub fn spawn_sweeper(store: Arc<RwLock<MemoryStore>>, interval: Duration) -> SweeperHandle {
    let (shutdown, mut signal) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!("starting cleanup sweeper with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = signal.changed() => {
                    info!("cleanup sweeper stopping");
                    break;
                }
            }

            // The pass deadline is captured before scanning, so every
            // removal decision in one pass uses the same clock reading
            let removed = {
                let mut store_guard = store.write().await;
                store_guard.purge_expired(Instant::now())
            };

            if removed > 0 {
                info!("active cleanup: removed {} expired entries", removed);
            } else {
                debug!("active cleanup: no expired entries found");
            }
        }
    });

    SweeperHandle { shutdown, task }
}
