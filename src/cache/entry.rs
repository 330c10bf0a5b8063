//! Cache Entry Module
//!
//! Defines the TTL policy and the structure of individual cache entries.

use std::time::Duration;

use tokio::time::Instant;

// == TTL ==
/// How long an entry stays valid after it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Entries expire this long after being written
    After(Duration),
    /// Entries are never considered stale
    Never,
}

impl Ttl {
    /// Computes the expiry of an entry written at `now`.
    ///
    /// A deadline that does not fit the clock is treated as never expiring.
    pub fn expiry_from(&self, now: Instant) -> Expiry {
        match self {
            Ttl::After(ttl) => now.checked_add(*ttl).map_or(Expiry::Never, Expiry::At),
            Ttl::Never => Expiry::Never,
        }
    }
}

// == Expiry ==
/// Point at which an entry stops being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    At(Instant),
    Never,
}

impl Expiry {
    /// True once `now` has reached the expiration instant.
    pub fn has_passed(&self, now: Instant) -> bool {
        match self {
            Expiry::At(deadline) => now >= *deadline,
            Expiry::Never => false,
        }
    }
}

// == Cache Entry ==
/// Represents a single cache entry with value and expiration.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry stops being served
    pub expires_at: Expiry,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry written at `now` under the given TTL.
    pub fn new(value: V, ttl: Ttl, now: Instant) -> Self {
        Self {
            value,
            expires_at: ttl.expiry_from(now),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired as soon as the current time is
    /// greater than or equal to its expiration time.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.has_passed(now)
    }
}
