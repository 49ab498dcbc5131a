//! Store Module
//!
//! The entry store: an in-memory key-value map with per-entry TTL
//! expiration and policy-dependent reclamation of expired entries.

mod entry;
mod memory;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::Entry;
pub use memory::MemoryStore;
