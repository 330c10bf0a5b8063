//! Cache Module
//!
//! Provides an in-memory read-through cache with TTL expiration and
//! single-flight loading.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, Expiry, Ttl};
pub use stats::CacheStats;
pub use store::TtlCache;
