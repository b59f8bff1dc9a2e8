//! Random Expire Cache Module
//!
//! Decorator that jitters TTLs on write so entries stored together do not
//! all expire together.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeDelta;
use rand::Rng;

use crate::cache::{Cache, CacheValue};
use crate::config::Config;
use crate::error::Result;

/// Source of the signed offset added to each TTL.
pub type OffsetFn = Arc<dyn Fn() -> TimeDelta + Send + Sync>;

/// Default offset range, in whole seconds: `[3, 8)`
const DEFAULT_OFFSET_SECS: std::ops::Range<i64> = 3..8;

/// Default offset: a uniformly random 3 to 7 seconds, always positive.
pub fn default_offset() -> TimeDelta {
    TimeDelta::seconds(rand::thread_rng().gen_range(DEFAULT_OFFSET_SECS))
}

// == Random Expire Cache ==
/// Wraps a cache and perturbs the TTL of every `put`.
///
/// All other operations are delegated unchanged. A "forever" TTL (zero, or
/// the inner store's embed expiry) is passed through as is, and a jittered
/// TTL never lands on the embed expiry. If an offset would make the TTL zero
/// or negative, the entry is written with a 1ns TTL so it is stale
/// immediately.
pub struct RandomExpireCache<C> {
    inner: C,
    offset: OffsetFn,
    /// The inner store's "forever" sentinel besides zero
    embed_expiry: Duration,
}

impl<C: Cache> RandomExpireCache<C> {
    /// Wraps `inner` using the default random offset.
    ///
    /// Only zero is treated as "forever"; use `with_config` when the inner
    /// store has a non-zero embed expiry.
    pub fn new(inner: C) -> Self {
        Self::with_offset_fn(inner, default_offset)
    }

    /// Wraps `inner` with a custom offset source.
    pub fn with_offset_fn<F>(inner: C, offset: F) -> Self
    where
        F: Fn() -> TimeDelta + Send + Sync + 'static,
    {
        Self {
            inner,
            offset: Arc::new(offset),
            embed_expiry: Duration::ZERO,
        }
    }

    /// Wraps `inner` with a custom offset source, honouring the embed expiry
    /// the inner store was built with.
    pub fn with_config<F>(inner: C, config: &Config, offset: F) -> Self
    where
        F: Fn() -> TimeDelta + Send + Sync + 'static,
    {
        let cache = Self::with_offset_fn(inner, offset);
        cache.with_embed_expiry(config.embed_expiry)
    }

    /// Returns a copy that treats `embed_expiry` as the "forever" sentinel.
    pub fn with_embed_expiry(mut self, embed_expiry: Duration) -> Self {
        self.embed_expiry = embed_expiry;
        self
    }

    /// Draws one offset from the configured source.
    pub fn offset(&self) -> TimeDelta {
        (self.offset)()
    }

    /// Borrows the wrapped cache.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Unwraps the decorator.
    pub fn into_inner(self) -> C {
        self.inner
    }

    fn is_forever(&self, ttl: Duration) -> bool {
        ttl.is_zero() || ttl == self.embed_expiry
    }

    fn jittered(&self, ttl: Duration) -> Duration {
        if self.is_forever(ttl) {
            return ttl;
        }

        let Ok(base) = TimeDelta::from_std(ttl) else {
            return ttl;
        };

        let adjusted = match base.checked_add(&self.offset()) {
            Some(adjusted) if adjusted > TimeDelta::zero() => adjusted.to_std().unwrap_or(ttl),
            Some(_) => Duration::from_nanos(1),
            None => ttl,
        };

        // A finite TTL must not turn into the sentinel
        if self.is_forever(adjusted) {
            adjusted + Duration::from_nanos(1)
        } else {
            adjusted
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for RandomExpireCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomExpireCache")
            .field("inner", &self.inner)
            .field("embed_expiry", &self.embed_expiry)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C: Cache> Cache for RandomExpireCache<C> {
    async fn get(&self, key: &str) -> Result<CacheValue> {
        self.inner.get(key).await
    }

    async fn get_multi(&self, keys: &[String]) -> Result<Vec<Option<CacheValue>>> {
        self.inner.get_multi(keys).await
    }

    async fn put(&self, key: &str, value: CacheValue, ttl: Duration) -> Result<()> {
        let ttl = self.jittered(ttl);
        self.inner.put(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.delete(key).await
    }

    async fn incr(&self, key: &str) -> Result<()> {
        self.inner.incr(key).await
    }

    async fn decr(&self, key: &str) -> Result<()> {
        self.inner.decr(key).await
    }

    async fn is_exist(&self, key: &str) -> Result<bool> {
        self.inner.is_exist(key).await
    }

    async fn clear_all(&self) -> Result<()> {
        self.inner.clear_all().await
    }
}
