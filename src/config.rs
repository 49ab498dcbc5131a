//! Configuration Module
//!
//! Handles loading cache configuration from an optional JSON file overlaid
//! by environment variables, resolving everything into a plain [`Config`]
//! the cache consumes.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;

// == Environment Variables ==
/// Sweep interval in whole seconds.
pub const ENV_TICK_INTERVAL_SECS: &str = "CACHE_TICK_INTERVAL_SECS";
/// Default TTL in whole seconds, applied when a `set` omits one.
pub const ENV_DEFAULT_TTL_SECS: &str = "CACHE_DEFAULT_TTL_SECS";
/// Cleanup policy name: `active`, `lazy` or `none`.
pub const ENV_CLEANUP_POLICY: &str = "CACHE_CLEANUP_POLICY";
/// Capacity hint for the entry map.
pub const ENV_INITIAL_CAPACITY: &str = "CACHE_INITIAL_CAPACITY";

// == Cleanup Policy ==
/// Error type for parsing a cleanup policy name.
#[derive(Debug, Clone)]
pub struct ParseCleanupPolicyError(String);

impl fmt::Display for ParseCleanupPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized cleanup policy: {}", self.0)
    }
}

impl std::error::Error for ParseCleanupPolicyError {}

/// How expired entries are reclaimed.
///
/// Fixed at construction; never changes the visibility of expired entries,
/// only whether and when they are physically removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPolicy {
    /// A periodic background sweep deletes every expired entry
    #[default]
    Active,
    /// An expired entry is deleted only when a read encounters it
    Lazy,
    /// Expired entries stay resident; reads simply filter them out
    None,
}

impl CleanupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanupPolicy::Active => "active",
            CleanupPolicy::Lazy => "lazy",
            CleanupPolicy::None => "none",
        }
    }

    /// Parses `raw`, falling back to the default policy (`active`) with a
    /// warning when the name is unrecognized.
    pub fn resolve(raw: &str) -> CleanupPolicy {
        raw.parse().unwrap_or_else(|err| {
            let fallback = CleanupPolicy::default();
            warn!("{err}, falling back to '{}'", fallback.as_str());
            fallback
        })
    }
}

impl fmt::Display for CleanupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleanupPolicy {
    type Err = ParseCleanupPolicyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(CleanupPolicy::Active),
            "lazy" => Ok(CleanupPolicy::Lazy),
            "none" => Ok(CleanupPolicy::None),
            _ => Err(ParseCleanupPolicyError(s.to_string())),
        }
    }
}

// == Config ==
/// Resolved cache configuration.
///
/// All values can be supplied by a JSON config file and overridden via
/// environment variables, with sensible defaults underneath.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interval between background sweep passes
    pub tick_interval: Duration,
    /// TTL applied when a `set` does not specify one
    pub default_ttl: Duration,
    /// Expiration-reclamation policy
    pub cleanup_policy: CleanupPolicy,
    /// Capacity hint for the entry map
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(20),
            default_ttl: Duration::from_secs(30 * 60),
            cleanup_policy: CleanupPolicy::Active,
            initial_capacity: 1024,
        }
    }
}

/// On-disk shape of the config file. Every field is optional; missing
/// fields keep their current value.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    tick_interval_secs: Option<u64>,
    default_ttl_secs: Option<u64>,
    cleanup_policy: Option<String>,
    initial_capacity: Option<usize>,
}

impl Config {
    /// Creates a Config from defaults plus environment overrides.
    ///
    /// # Environment Variables
    /// - `CACHE_TICK_INTERVAL_SECS` - sweep interval in seconds (default: 20)
    /// - `CACHE_DEFAULT_TTL_SECS` - default TTL in seconds (default: 1800)
    /// - `CACHE_CLEANUP_POLICY` - `active`, `lazy` or `none` (default: active)
    /// - `CACHE_INITIAL_CAPACITY` - entry map capacity hint (default: 1024)
    ///
    /// Malformed values are ignored and the prior value stands; an
    /// unrecognized policy name falls back to `active` with a warning.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Loads configuration: defaults, then the optional JSON file at
    /// `path`, then environment overrides.
    ///
    /// A `None` path or a file that does not exist leaves the defaults in
    /// place. A file that exists but cannot be read or parsed is a
    /// construction-time error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = path {
            match fs::read(path) {
                Ok(bytes) => {
                    let raw: ConfigFile = serde_json::from_slice(&bytes)?;
                    config.apply_file(raw);
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!("config file {} not found, using defaults", path.display());
                }
                Err(err) => return Err(err.into()),
            }
        }

        config.apply_env();
        debug!(
            "loaded config: tick_interval={:?} default_ttl={:?} cleanup_policy={} initial_capacity={}",
            config.tick_interval, config.default_ttl, config.cleanup_policy, config.initial_capacity
        );
        Ok(config)
    }

    fn apply_file(&mut self, raw: ConfigFile) {
        if let Some(secs) = raw.tick_interval_secs {
            self.tick_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = raw.default_ttl_secs {
            self.default_ttl = Duration::from_secs(secs);
        }
        if let Some(policy) = raw.cleanup_policy {
            self.cleanup_policy = CleanupPolicy::resolve(&policy);
        }
        if let Some(capacity) = raw.initial_capacity {
            self.initial_capacity = capacity;
        }
    }

    fn apply_env(&mut self) {
        if let Some(secs) = env_parse::<u64>(ENV_TICK_INTERVAL_SECS) {
            self.tick_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parse::<u64>(ENV_DEFAULT_TTL_SECS) {
            self.default_ttl = Duration::from_secs(secs);
        }
        if let Ok(raw) = env::var(ENV_CLEANUP_POLICY) {
            if !raw.is_empty() {
                self.cleanup_policy = CleanupPolicy::resolve(&raw);
            }
        }
        if let Some(capacity) = env_parse::<usize>(ENV_INITIAL_CAPACITY) {
            self.initial_capacity = capacity;
        }
    }
}

/// Reads and parses one environment variable, ignoring it when unset or
/// malformed.
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
