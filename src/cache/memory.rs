//! Memory Cache Module
//!
//! Thread-safe TTL cache: a `CacheStore` behind a tokio `RwLock`, plus the
//! background sweep that reclaims expired entries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::cache::{Cache, CacheStore, CacheValue};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweep_task, SweepHandle};

// == Memory Cache ==
/// In-process cache with lazy and active TTL expiration.
///
/// Every operation holds the store lock for its whole duration, so counter
/// updates are atomic read-modify-write sequences.
///
/// Share an instance between tasks with `Arc<MemoryCache>`.
#[derive(Debug)]
pub struct MemoryCache {
    /// Shared map; the sweep task holds the other reference
    store: Arc<RwLock<CacheStore>>,
    /// Running sweep task, `None` when disabled or shut down
    sweeper: Mutex<Option<SweepHandle>>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an empty cache and starts its sweep task.
    ///
    /// A zero `sweep_interval` disables active sweeping; expired entries are
    /// then only hidden, never reclaimed.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime while the sweep is enabled.
    /// Use `try_new` to get an error instead.
    pub fn new(config: Config) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new(config.embed_expiry)));

        let sweeper = if config.sweep_interval.is_zero() {
            warn!("TTL sweep disabled: expired entries will not be reclaimed");
            None
        } else {
            Some(spawn_sweep_task(store.clone(), config.sweep_interval))
        };

        Self {
            store,
            sweeper: Mutex::new(sweeper),
        }
    }

    /// Creates an empty cache, failing with `NoRuntime` instead of panicking
    /// when the sweep cannot be spawned.
    pub fn try_new(config: Config) -> Result<Self> {
        if !config.sweep_interval.is_zero() {
            if let Err(err) = Handle::try_current() {
                return Err(CacheError::NoRuntime(err.to_string()));
            }
        }
        Ok(Self::new(config))
    }

    // == Shutdown ==
    /// Stops the sweep task and waits for it to exit. Calling it again is a
    /// no-op.
    ///
    /// Dropping the cache also stops the task, without waiting.
    pub async fn shutdown(&self) {
        let sweeper = self.sweeper.lock().await.take();
        if let Some(sweeper) = sweeper {
            sweeper.stop().await;
        }
    }

    // == Diagnostics ==
    /// Returns the absolute expiration stored for `key`, expired or not.
    pub async fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.store.read().await.expires_at(key)
    }

    /// Returns the number of physically stored entries, including expired
    /// ones not yet swept.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<CacheValue> {
        self.store.read().await.get(key)
    }

    async fn get_multi(&self, keys: &[String]) -> Result<Vec<Option<CacheValue>>> {
        self.store.read().await.get_multi(keys)
    }

    async fn put(&self, key: &str, value: CacheValue, ttl: Duration) -> Result<()> {
        self.store.write().await.set(key.to_string(), value, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.delete(key);
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<()> {
        self.store.write().await.incr(key)
    }

    async fn decr(&self, key: &str) -> Result<()> {
        self.store.write().await.decr(key)
    }

    async fn is_exist(&self, key: &str) -> Result<bool> {
        Ok(self.store.read().await.contains(key))
    }

    async fn clear_all(&self) -> Result<()> {
        let removed = self.store.write().await.clear();
        debug!("Cleared {} cache entries", removed);
        Ok(())
    }
}
