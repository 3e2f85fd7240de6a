//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value together with its fixed expiry window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Start of the TTL window
    pub inserted_at: Instant,
    /// Length of the TTL window, fixed at insertion
    pub ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry whose TTL window starts now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self::starting_at(value, ttl, Instant::now())
    }

    pub(crate) fn starting_at(value: String, ttl: Duration, inserted_at: Instant) -> Self {
        Self {
            value,
            inserted_at,
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        is_expired(now, self.inserted_at, self.ttl)
    }

    /// Checks whether the entry has expired as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining TTL, saturating at zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        (self.inserted_at + self.ttl).saturating_duration_since(Instant::now())
    }
}

/// Expiry rule shared by every lookup: the window is closed at exactly
/// `inserted_at + ttl`, so a zero TTL is expired immediately.
pub fn is_expired(now: Instant, inserted_at: Instant, ttl: Duration) -> bool {
    now >= inserted_at + ttl
}
