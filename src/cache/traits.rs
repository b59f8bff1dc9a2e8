//! Cache Contract
//!
//! The interface shared by the in-process store, the jitter decorator and any
//! remote backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheValue;
use crate::error::Result;

/// Uniform cache operations.
///
/// Calls are cancelled by dropping the returned future.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value by key.
    ///
    /// Fails with `KeyNotExist` for unknown keys and `KeyExpired` for keys
    /// whose TTL has elapsed.
    async fn get(&self, key: &str) -> Result<CacheValue>;

    /// Batch version of `get`. Values are aligned with `keys`.
    ///
    /// Missing or expired keys yield a `MultiGetFailed` error that still
    /// carries the values that were found.
    async fn get_multi(&self, keys: &[String]) -> Result<Vec<Option<CacheValue>>>;

    /// Stores a value. A zero TTL means "never expires".
    async fn put(&self, key: &str, value: CacheValue, ttl: Duration) -> Result<()>;

    /// Deletes a value. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Increments an integer value in place.
    async fn incr(&self, key: &str) -> Result<()>;

    /// Decrements an integer value in place.
    async fn decr(&self, key: &str) -> Result<()>;

    /// Checks whether a key is present and unexpired. Expiry is not an error.
    async fn is_exist(&self, key: &str) -> Result<bool>;

    /// Removes every entry.
    async fn clear_all(&self) -> Result<()>;
}

macro_rules! forward_cache {
    ($ty:ty) => {
        #[async_trait]
        impl<C: Cache + ?Sized> Cache for $ty {
            async fn get(&self, key: &str) -> Result<CacheValue> {
                (**self).get(key).await
            }

            async fn get_multi(&self, keys: &[String]) -> Result<Vec<Option<CacheValue>>> {
                (**self).get_multi(keys).await
            }

            async fn put(&self, key: &str, value: CacheValue, ttl: Duration) -> Result<()> {
                (**self).put(key, value, ttl).await
            }

            async fn delete(&self, key: &str) -> Result<()> {
                (**self).delete(key).await
            }

            async fn incr(&self, key: &str) -> Result<()> {
                (**self).incr(key).await
            }

            async fn decr(&self, key: &str) -> Result<()> {
                (**self).decr(key).await
            }

            async fn is_exist(&self, key: &str) -> Result<bool> {
                (**self).is_exist(key).await
            }

            async fn clear_all(&self) -> Result<()> {
                (**self).clear_all().await
            }
        }
    };
}

forward_cache!(Arc<C>);
forward_cache!(Box<C>);
