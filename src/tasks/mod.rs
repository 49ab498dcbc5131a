//! Background Tasks Module
//!
//! Long-running tasks spawned by the cache, currently just the TTL
//! cleanup sweeper.

mod cleanup;

pub use cleanup::{spawn_sweeper, SweeperHandle};
