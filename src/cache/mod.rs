//! Cache Module
//!
//! Provides the in-memory store with TTL expiry, a hard admission ceiling
//! and glob key enumeration.

mod clock;
mod entry;
mod key;
mod pattern;
mod shared;
mod stats;
mod store;
mod value;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, EntryMetadata};
pub use key::{validate_key, KeyViolation};
pub use pattern::GlobPattern;
pub use shared::SharedStore;
pub use stats::CacheStats;
pub use store::TtlStore;
pub use value::{
    decode, encode, from_value, to_value, validate_value, Value, ValueViolation, ViolationKind,
};

// == Public Constants ==
/// Maximum allowed key length in characters
pub const MAX_KEY_LENGTH: usize = 250;

/// Maximum nesting depth of a stored value
pub const MAX_VALUE_DEPTH: usize = 64;

/// Default interval between background sweeps, in seconds
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
