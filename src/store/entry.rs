//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::{Duration, Instant};

/// Stand-in deadline for TTLs too large for the platform clock.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

// == Entry ==
/// A single stored value with its absolute expiration time.
///
/// Every entry expires; callers that want a long-lived entry pick a long
/// TTL. Timekeeping is monotonic (`Instant`), so wall-clock adjustments
/// never resurrect or prematurely expire an entry.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored value, opaque bytes
    pub value: Vec<u8>,
    /// Absolute expiration time
    pub expires_at: Instant,
}

impl Entry {
    // == Constructor ==
    /// Creates an entry expiring at the given instant.
    pub fn new(value: Vec<u8>, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    /// Creates an entry expiring `ttl` from now.
    pub fn with_ttl(value: Vec<u8>, ttl: Duration) -> Self {
        Self::new(value, Self::expiry_after(ttl))
    }

    /// Absolute expiration instant `ttl` from now.
    ///
    /// A TTL that would overflow the platform clock saturates to a
    /// deadline decades out, so extreme values like `Duration::MAX`
    /// behave as "effectively never expires" instead of panicking.
    pub fn expiry_after(ttl: Duration) -> Instant {
        let now = Instant::now();
        now.checked_add(ttl).unwrap_or_else(|| now + FAR_FUTURE)
    }

    // == Is Expired ==
    /// Checks whether the entry is expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches the
    /// expiration time, so an entry whose `expires_at` equals `now` is
    /// already invisible to reads.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at <= now
    }

    /// Checks whether the entry is expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Remaining TTL ==
    /// Returns the time left until expiry, saturating at zero.
    pub fn remaining_ttl(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
