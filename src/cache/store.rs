//! TTL Store Module
//!
//! The synchronous store core: a HashMap of entries with lazy expiry, a hard
//! admission ceiling and glob key listing. Callers sharing it across tasks
//! go through [`SharedStore`](crate::cache::SharedStore), which serializes
//! every operation behind one mutex.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{
    validate_key, validate_value, CacheEntry, CacheStats, Clock, EntryMetadata, GlobPattern,
    SystemClock, Value,
};
use crate::error::{Result, StoreError};

// == TTL Store ==
/// Key-value storage with per-entry expiry and a maximum key count.
#[derive(Debug)]
pub struct TtlStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of distinct live keys
    max_size: usize,
    /// Time source for timestamps and expiry
    clock: Arc<dyn Clock>,
    /// No resident entry expires before this instant; None if none has a TTL
    next_expiry: Option<u64>,
}

impl TtlStore {
    // == Constructor ==
    /// Creates an empty store admitting at most `max_size` keys, reading the wall clock.
    pub fn new(max_size: usize) -> Self {
        Self::with_clock(max_size, Arc::new(SystemClock))
    }

    /// Creates an empty store with an explicit time source.
    pub fn with_clock(max_size: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_size,
            clock,
            next_expiry: None,
        }
    }

    // == Set ==
    /// Stores a value under `key`, optionally expiring `ttl` from now.
    ///
    /// Updating a live key always succeeds and keeps its creation time. A new
    /// key is rejected with `QuotaExceeded` when the store already holds
    /// `max_size` live keys; nothing is evicted to make room. A key whose
    /// previous entry has expired counts as new.
    ///
    /// # Errors
    /// - `InvalidKey` if the key fails the format check
    /// - `Serialization` if the value is not transport safe
    /// - `QuotaExceeded` if the key is new and the store is full
    pub fn set(&mut self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        validate_key(key)?;
        validate_value(&value)?;

        let now = self.clock.now_ms();
        self.reap_if_expired(key, now);

        // Overwrite case: never subject to the ceiling
        if let Some(entry) = self.entries.get_mut(key) {
            entry.refresh(value, now, ttl);
            let expires_at = entry.expires_at;
            self.note_expiry(expires_at);
            return Ok(());
        }

        if self.entries.len() >= self.max_size {
            // Residents may include expired entries the sweep has not reached yet.
            self.purge_expired_at(now);
            if self.entries.len() >= self.max_size {
                self.stats.record_rejection();
                warn!(key, max_size = self.max_size, "store full, rejecting new key");
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    max_size: self.max_size,
                });
            }
        }

        let entry = CacheEntry::new(value, now, ttl);
        self.note_expiry(entry.expires_at);
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Retrieves the live value for `key`.
    ///
    /// An expired entry is removed during the read and reported as absent.
    pub fn get(&mut self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;
        let now = self.clock.now_ms();
        self.reap_if_expired(key, now);

        match self.entries.get(key) {
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Ok(Some(value))
            }
            None => {
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Has ==
    /// Checks whether `key` holds a live entry, reaping it if expired.
    pub fn has(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let now = self.clock.now_ms();
        self.reap_if_expired(key, now);
        Ok(self.entries.contains_key(key))
    }

    // == Delete ==
    /// Removes the entry for `key`.
    ///
    /// Returns true only if a live entry was removed. An expired entry is
    /// reaped and reported as false.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let now = self.clock.now_ms();
        self.reap_if_expired(key, now);

        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        Ok(removed)
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_expiry = None;
        self.stats.set_total_entries(0);
    }

    // == Keys ==
    /// Lists live keys, optionally filtered by a glob.
    ///
    /// Expired entries are swept first. Order is unspecified.
    pub fn keys(&mut self, pattern: Option<&str>) -> Vec<String> {
        self.purge_expired();

        match pattern.map(GlobPattern::new) {
            Some(glob) => self
                .entries
                .keys()
                .filter(|key| glob.matches(key))
                .cloned()
                .collect(),
            None => self.entries.keys().cloned().collect(),
        }
    }

    // == Size ==
    /// Number of live entries, after sweeping expired ones.
    pub fn size(&mut self) -> usize {
        self.purge_expired();
        self.entries.len()
    }

    // == Metadata ==
    /// Timestamps for a live key, with the same lazy reaping as `has`.
    pub fn metadata(&mut self, key: &str) -> Result<Option<EntryMetadata>> {
        validate_key(key)?;
        let now = self.clock.now_ms();
        self.reap_if_expired(key, now);
        Ok(self.entries.get(key).map(|entry| entry.metadata(now)))
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.purge_expired_at(now)
    }

    /// Scans only when some entry can have expired by `now`.
    fn purge_expired_at(&mut self, now: u64) -> usize {
        match self.next_expiry {
            Some(due) if due <= now => {}
            _ => return 0,
        }

        let before = self.entries.len();
        let mut next_expiry: Option<u64> = None;
        self.entries.retain(|_, entry| {
            if entry.is_expired_at(now) {
                return false;
            }
            if let Some(expires) = entry.expires_at {
                next_expiry = Some(next_expiry.map_or(expires, |n| n.min(expires)));
            }
            true
        });
        self.next_expiry = next_expiry;
        let removed = before - self.entries.len();

        if removed > 0 {
            self.stats.record_expired(removed);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    /// Lowers the earliest-expiry bound to cover a newly stamped deadline.
    fn note_expiry(&mut self, expires_at: Option<u64>) {
        if let Some(expires) = expires_at {
            self.next_expiry = Some(self.next_expiry.map_or(expires, |n| n.min(expires)));
        }
    }

    /// Drops `key` if its entry has expired.
    fn reap_if_expired(&mut self, key: &str, now: u64) {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now));

        if expired {
            self.entries.remove(key);
            self.stats.record_expired(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "reaped expired entry on access");
        }
    }

    /// Maximum number of distinct live keys.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    // == Length ==
    /// Number of resident entries, including expired ones not yet reaped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is resident.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
