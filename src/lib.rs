//! memstash - An embeddable in-memory key-value cache
//!
//! Stores opaque byte values under string keys, each with its own
//! expiration deadline. Expired entries become invisible to reads the
//! moment their deadline passes; how their memory is reclaimed depends on
//! the [`CleanupPolicy`] chosen at construction. The `Active` policy runs
//! a background sweeper, `Lazy` removes an expired entry when a read
//! touches it, and `None` keeps expired entries in memory until they are
//! overwritten or deleted.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use memstash::{Cache, Config};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cache = Cache::new(Config::default());
//!
//! cache
//!     .set(
//!         "session:42".to_string(),
//!         b"alive".to_vec(),
//!         Some(Duration::from_secs(60)),
//!     )
//!     .await;
//!
//! assert_eq!(cache.get("session:42").await, Some(b"alive".to_vec()));
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod logger;
pub mod store;
pub mod tasks;

pub use cache::Cache;
pub use config::{CleanupPolicy, Config};
pub use error::{CacheError, Result};
pub use logger::{Logger, NoopLogger, StdoutLogger, TracingLogger};
pub use store::{Entry, MemoryStore};
pub use tasks::{spawn_sweeper, SweeperHandle};
