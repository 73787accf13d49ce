//! Background Tasks Module
//!
//! Contains background tasks that run periodically while a store is alive.
//!
//! # Tasks
//! - TTL Sweep: Removes expired entries at a configured interval

mod sweep;

pub use sweep::{spawn_sweep_task, SweepTask};
