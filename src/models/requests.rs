//! Request DTOs for the store API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.
//! Key format is checked by the store itself, not here.

use std::time::Duration;

use serde::Deserialize;

use crate::cache::Value;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The key to store the value under
/// - `value`: Any JSON value
/// - `ttl_ms`: Optional lifetime in milliseconds; absent means no expiry
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// The requested lifetime as a Duration.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_ms.map(Duration::from_millis)
    }
}

/// Query string for GET /keys
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysQuery {
    /// Glob pattern; `*` and `?` are wildcards
    #[serde(default)]
    pub pattern: Option<String>,
}
