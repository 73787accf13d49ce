//! TTL Store - an in-process key-value store with per-key expiry
//!
//! Values live in memory under validated keys, expire lazily on read and in
//! a periodic background sweep, and are admitted only while the store is
//! below its size ceiling. Nothing is ever evicted to make room.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{SharedStore, TtlStore, Value};
pub use config::Config;
pub use error::{Result, StoreError};
