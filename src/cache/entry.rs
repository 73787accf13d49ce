//! Cache Entry Module
//!
//! Defines the structure for individual store entries with TTL support.

use std::time::Duration;

use serde::Serialize;

use crate::cache::Value;

// == Cache Entry ==
/// Represents a single store entry with value and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// First insertion timestamp (milliseconds), preserved across updates
    pub created_at: u64,
    /// Last write timestamp (milliseconds)
    pub updated_at: u64,
    /// Expiration timestamp (milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry written at `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now` - Current time in milliseconds
    /// * `ttl` - Optional time-to-live measured from `now`
    pub fn new(value: Value, now: u64, ttl: Option<Duration>) -> Self {
        Self {
            value,
            created_at: now,
            updated_at: now,
            expires_at: expiry_from(now, ttl),
        }
    }

    // == Refresh ==
    /// Overwrites the value in place, keeping `created_at`.
    pub fn refresh(&mut self, value: Value, now: u64, ttl: Option<Duration>) {
        self.value = value;
        self.updated_at = now;
        self.expires_at = expiry_from(now, ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry whose expiry equals the current time is already expired.
    pub fn is_expired_at(&self, now: u64) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining_ms(&self, now: u64) -> Option<u64> {
        self.expires_at.map(|expires| expires.saturating_sub(now))
    }

    /// Snapshot of the entry's timestamps at `now`.
    pub fn metadata(&self, now: u64) -> EntryMetadata {
        EntryMetadata {
            created_at: self.created_at,
            updated_at: self.updated_at,
            expires_at: self.expires_at,
            ttl_remaining_ms: self.ttl_remaining_ms(now),
        }
    }
}

fn expiry_from(now: u64, ttl: Option<Duration>) -> Option<u64> {
    ttl.map(|ttl| now.saturating_add(ttl.as_millis().min(u64::MAX as u128) as u64))
}

// == Entry Metadata ==
/// Timestamps of a live entry, without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryMetadata {
    pub created_at: u64,
    pub updated_at: u64,
    pub expires_at: Option<u64>,
    pub ttl_remaining_ms: Option<u64>,
}
