//! Shared Store Module
//!
//! Async handle over a [`TtlStore`]: every operation runs under one mutex,
//! and the handle owns the background sweep.

use std::sync::{Arc, PoisonError};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::cache::{from_value, to_value, CacheStats, EntryMetadata, TtlStore, Value};
use crate::config::Config;
use crate::error::Result;
use crate::tasks::SweepTask;

// == Shared Store ==
/// The store as collaborators see it.
///
/// Build one at process start and hand it (usually inside an `Arc`) to
/// whatever needs it. Call [`destroy`](Self::destroy) on shutdown or between
/// test cases; dropping the handle also stops the sweep.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use ttl_store::cache::{SharedStore, TtlStore, Value};
///
/// #[tokio::main]
/// async fn main() -> ttl_store::error::Result<()> {
///     let store = SharedStore::new(TtlStore::new(1000), Duration::from_secs(60));
///     store.set("prd:42", Value::from("# Draft"), Some(Duration::from_secs(3600))).await?;
///     let ids = store.keys(Some("prd:*")).await;
///     assert_eq!(ids, vec!["prd:42"]);
///     store.destroy();
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct SharedStore {
    inner: Arc<Mutex<TtlStore>>,
    sweeper: std::sync::Mutex<Option<SweepTask>>,
}

impl SharedStore {
    // == Constructors ==
    /// Wraps `store` and starts sweeping it every `sweep_interval`.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn new(store: TtlStore, sweep_interval: Duration) -> Self {
        let inner = Arc::new(Mutex::new(store));
        let sweeper = SweepTask::spawn(inner.clone(), sweep_interval);

        Self {
            inner,
            sweeper: std::sync::Mutex::new(Some(sweeper)),
        }
    }

    /// Wraps `store` without a background sweep; expiry is then purely lazy.
    pub fn without_sweeper(store: TtlStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
            sweeper: std::sync::Mutex::new(None),
        }
    }

    /// Builds the process store from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TtlStore::new(config.max_size),
            Duration::from_secs(config.sweep_interval),
        )
    }

    // == Operations ==
    /// See [`TtlStore::get`].
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.lock().await.get(key)
    }

    /// See [`TtlStore::set`].
    pub async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        self.inner.lock().await.set(key, value, ttl)
    }

    /// See [`TtlStore::delete`].
    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.inner.lock().await.delete(key)
    }

    /// See [`TtlStore::has`].
    pub async fn has(&self, key: &str) -> Result<bool> {
        self.inner.lock().await.has(key)
    }

    /// See [`TtlStore::clear`].
    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    /// See [`TtlStore::keys`].
    pub async fn keys(&self, pattern: Option<&str>) -> Vec<String> {
        self.inner.lock().await.keys(pattern)
    }

    /// See [`TtlStore::size`].
    pub async fn size(&self) -> usize {
        self.inner.lock().await.size()
    }

    /// See [`TtlStore::metadata`].
    pub async fn metadata(&self, key: &str) -> Result<Option<EntryMetadata>> {
        self.inner.lock().await.metadata(key)
    }

    /// Snapshot of the store's activity counters.
    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    /// The admission ceiling the store was built with.
    pub async fn max_size(&self) -> usize {
        self.inner.lock().await.max_size()
    }

    // == Typed Helpers ==
    /// Serializes `value` and stores it.
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let value = to_value(value)?;
        self.set(key, value, ttl).await
    }

    /// Reads `key` back into a caller type.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(value) => Ok(Some(from_value(&value)?)),
            None => Ok(None),
        }
    }

    // == Destroy ==
    /// Stops the background sweep.
    ///
    /// The store stays usable and still reaps lazily on access. Calling this
    /// again does nothing.
    pub fn destroy(&self) {
        let task = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if task.is_some() {
            info!("TTL sweep cancelled");
        }
    }

    /// Returns true while the background sweep is owned by this handle.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
