//! TTL Sweep Task
//!
//! Background task that periodically removes expired entries, and the guard
//! that owns it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlStore;

/// Shortest interval the sweep will run at.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task loops forever, sleeping for `interval` between runs, and takes
/// the store mutex for each sweep so it never interleaves with a foreground
/// operation.
///
/// # Arguments
/// * `store` - Shared reference to the store
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task. Prefer [`SweepTask`], which aborts
/// the task when dropped.
pub fn spawn_sweep_task(store: Arc<Mutex<TtlStore>>, interval: Duration) -> JoinHandle<()> {
    let interval = interval.max(MIN_SWEEP_INTERVAL);

    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting TTL sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store_guard = store.lock().await;
                store_guard.purge_expired()
            };

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}

// == Sweep Task ==
/// Owned handle to a running sweep.
///
/// Dropping the handle aborts the task, so a discarded store never leaves a
/// repeating timer behind.
#[derive(Debug)]
pub struct SweepTask {
    handle: JoinHandle<()>,
}

impl SweepTask {
    /// Starts sweeping `store` every `interval`.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn spawn(store: Arc<Mutex<TtlStore>>, interval: Duration) -> Self {
        Self {
            handle: spawn_sweep_task(store, interval),
        }
    }

    /// Returns true once the task has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
