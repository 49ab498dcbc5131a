//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! The hot-path operations (`set`, `get`, `delete`) are infallible by
//! contract (a miss is `None`, never an error), so the only failures a
//! caller can see happen while loading configuration.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Config file exists but could not be read
    #[error("failed to read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Config file contents are not valid JSON for the expected shape
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
