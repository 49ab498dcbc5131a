//! Cache demo walking through the whole lifecycle: configuration, writes
//! with mixed TTLs, background cleanup and shutdown.
//!
//! Run with `cargo run --example demo`. Pass a JSON config file path as
//! the first argument to overlay the defaults, or set the `CACHE_*`
//! environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memstash::{Cache, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Default to debug so the per-entry cleanup lines are visible,
    // can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memstash=debug,demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;
    info!(
        "Configuration: policy={}, default_ttl={:?}, tick_interval={:?}",
        config.cleanup_policy, config.default_ttl, config.tick_interval
    );

    let cache = Cache::new(config);

    // A short interval so the demo shows sweep passes without waiting
    // out the configured tick
    if cache.start_cleanup(Duration::from_secs(1)).await {
        info!("Background cleanup sweeper started");
    }

    cache
        .set(
            "session:alice".to_string(),
            b"logged-in".to_vec(),
            Some(Duration::from_secs(2)),
        )
        .await;
    cache
        .set("config:theme".to_string(), b"dark".to_vec(), None)
        .await;
    info!("Stored 2 entries, {} in the cache", cache.len().await);

    match cache.get("session:alice").await {
        Some(value) => info!("session:alice = {:?}", String::from_utf8_lossy(&value)),
        None => info!("session:alice not found"),
    }

    info!("Sleeping past the session TTL...");
    tokio::time::sleep(Duration::from_secs(3)).await;

    match cache.get("session:alice").await {
        Some(value) => info!("session:alice = {:?}", String::from_utf8_lossy(&value)),
        None => info!("session:alice expired, as expected"),
    }
    info!(
        "{} entries remain after the sweeper's pass",
        cache.len().await
    );

    cache.delete("config:theme").await;
    cache.stop_cleanup().await;
    info!("Demo complete");

    Ok(())
}
