//! Cache Store Module
//!
//! Map engine behind `MemoryCache`: HashMap storage with lazy TTL checks.
//! Callers provide the locking; every method here runs under one guard.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::calc;
use crate::cache::entry::FOREVER;
use crate::cache::{CacheEntry, CacheValue};
use crate::error::{CacheError, MultiGetError, Result};

// == Cache Store ==
/// Key/value storage with per-entry absolute expiration.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// TTL treated as "never expires", in addition to zero
    embed_expiry: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `embed_expiry` - TTL value that, like zero, means "store forever"
    pub fn new(embed_expiry: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            embed_expiry,
        }
    }

    fn effective_ttl(&self, ttl: Duration) -> Duration {
        if ttl.is_zero() || ttl == self.embed_expiry {
            FOREVER
        } else {
            ttl
        }
    }

    // == Set ==
    /// Stores a value, overwriting any previous entry and its TTL.
    pub fn set(&mut self, key: String, value: CacheValue, ttl: Duration) {
        let entry = CacheEntry::new(value, self.effective_ttl(ttl));
        self.entries.insert(key, entry);
    }

    /// Looks up an entry that is present and not expired.
    fn live_entry(&self, key: &str) -> Result<&CacheEntry> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => Err(CacheError::KeyExpired(key.to_string())),
            Some(entry) => Ok(entry),
            None => Err(CacheError::KeyNotExist(key.to_string())),
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are reported as `KeyExpired` but left in place for the
    /// sweep to reclaim.
    pub fn get(&self, key: &str) -> Result<CacheValue> {
        self.live_entry(key).map(|entry| entry.value.clone())
    }

    // == Get Multi ==
    /// Retrieves several keys at once.
    ///
    /// Failing keys do not abort the batch; they are collected into a
    /// `MultiGetFailed` error that also carries the retrieved values.
    pub fn get_multi<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<Option<CacheValue>>> {
        let mut values = Vec::with_capacity(keys.len());
        let mut failures = Vec::new();

        for key in keys {
            let key = key.as_ref();
            match self.get(key) {
                Ok(value) => values.push(Some(value)),
                Err(err) => {
                    values.push(None);
                    failures.push((key.to_string(), err));
                }
            }
        }

        if failures.is_empty() {
            Ok(values)
        } else {
            let err = MultiGetError { values, failures };
            Err(CacheError::MultiGetFailed(err))
        }
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Counters ==
    /// Increments the integer stored under `key` in place.
    pub fn incr(&mut self, key: &str) -> Result<()> {
        self.update_counter(key, calc::increment)
    }

    /// Decrements the integer stored under `key` in place.
    pub fn decr(&mut self, key: &str) -> Result<()> {
        self.update_counter(key, calc::decrement)
    }

    fn update_counter(
        &mut self,
        key: &str,
        op: fn(&CacheValue) -> Result<CacheValue>,
    ) -> Result<()> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| CacheError::KeyNotExist(key.to_string()))?;

        if entry.is_expired() {
            return Err(CacheError::KeyExpired(key.to_string()));
        }

        match op(&entry.value) {
            Ok(next) => {
                entry.value = next;
                Ok(())
            }
            Err(err) => {
                debug!(key, error = %err, "counter update rejected");
                Err(err)
            }
        }
    }

    // == Contains ==
    /// Returns true if the key is present and not expired.
    pub fn contains(&self, key: &str) -> bool {
        self.live_entry(key).is_ok()
    }

    // == Clear ==
    /// Removes every entry. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Expires At ==
    /// Returns the absolute expiration of a stored entry, expired or not.
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|entry| entry.expires_at)
    }

    // == Length ==
    /// Returns the number of physically stored entries, including expired
    /// ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(300);
    const ONE_SEC: Duration = Duration::from_secs(1);

    fn put(store: &mut CacheStore, key: &str, value: impl Into<CacheValue>, ttl: Duration) {
        store.set(key.to_string(), value.into(), ttl);
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(Duration::ZERO);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(Duration::ZERO);

        put(&mut store, "key1", "value1", TTL);
        let value = store.get("key1").unwrap();

        assert_eq!(value, CacheValue::from("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = CacheStore::new(Duration::ZERO);

        let result = store.get("nonexistent");
        assert_eq!(result, Err(CacheError::KeyNotExist("nonexistent".into())));
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new(Duration::ZERO);

        put(&mut store, "key1", "value1", TTL);
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        let result = store.get("key1");
        assert!(matches!(result, Err(CacheError::KeyNotExist(_))));
    }

    #[test]
    fn test_store_delete_nonexistent() {
        let mut store = CacheStore::new(Duration::ZERO);
        assert!(!store.delete("nonexistent"));
    }

    #[test]
    fn test_store_overwrite_resets_ttl() {
        let mut store = CacheStore::new(Duration::ZERO);

        put(&mut store, "key1", "value1", ONE_SEC);
        put(&mut store, "key1", "value2", TTL);

        sleep(Duration::from_millis(1100));

        assert_eq!(store.get("key1").unwrap(), CacheValue::from("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration_is_lazy() {
        let mut store = CacheStore::new(Duration::ZERO);

        put(&mut store, "key1", "value1", ONE_SEC);
        assert!(store.get("key1").is_ok());

        sleep(Duration::from_millis(1100));

        let result = store.get("key1");
        assert!(matches!(result, Err(CacheError::KeyExpired(_))));
        assert!(!store.contains("key1"));
        // Still physically present until swept
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_zero_ttl_is_forever() {
        let mut store = CacheStore::new(Duration::ZERO);
        put(&mut store, "key1", 1i64, Duration::ZERO);

        let expires_at = store.expires_at("key1").unwrap();
        assert!(expires_at > Utc::now() + TimeDelta::days(365 * 9));
    }

    #[test]
    fn test_store_embed_expiry_is_forever() {
        let embed = Duration::from_secs(42);
        let mut store = CacheStore::new(embed);
        put(&mut store, "key1", 1i64, embed);
        put(&mut store, "key2", 1i64, Duration::from_secs(43));

        let horizon = Utc::now() + TimeDelta::days(365 * 9);
        assert!(store.expires_at("key1").unwrap() > horizon);
        assert!(store.expires_at("key2").unwrap() < horizon);
    }

    #[test]
    fn test_store_incr_decr_preserves_kind() {
        let mut store = CacheStore::new(Duration::ZERO);
        put(&mut store, "n", 5i32, TTL);

        store.incr("n").unwrap();
        assert_eq!(store.get("n").unwrap(), CacheValue::Int32(6));

        store.decr("n").unwrap();
        assert_eq!(store.get("n").unwrap(), CacheValue::Int32(5));
    }

    #[test]
    fn test_store_incr_overflow_leaves_value() {
        let mut store = CacheStore::new(Duration::ZERO);
        put(&mut store, "n", u32::MAX, TTL);

        let result = store.incr("n");
        assert!(matches!(result, Err(CacheError::IncrementOverflow(_))));
        assert_eq!(store.get("n").unwrap(), CacheValue::Uint32(u32::MAX));
    }

    #[test]
    fn test_store_incr_errors() {
        let mut store = CacheStore::new(Duration::ZERO);
        put(&mut store, "s", "text", TTL);
        put(&mut store, "e", 1i64, ONE_SEC);

        let missing = store.incr("missing");
        assert!(matches!(missing, Err(CacheError::KeyNotExist(_))));
        let text = store.decr("s");
        assert!(matches!(text, Err(CacheError::NotIntegerType(_))));

        sleep(Duration::from_millis(1100));
        let expired = store.incr("e");
        assert!(matches!(expired, Err(CacheError::KeyExpired(_))));
    }

    #[test]
    fn test_store_get_multi_partial() {
        let mut store = CacheStore::new(Duration::ZERO);
        put(&mut store, "a", "1", TTL);
        put(&mut store, "c", "3", TTL);

        let err = store.get_multi(&["a", "b", "c", "d"]).unwrap_err();
        let CacheError::MultiGetFailed(multi) = err else {
            panic!("expected MultiGetFailed");
        };

        let (one, three) = (CacheValue::from("1"), CacheValue::from("3"));
        assert_eq!(multi.values, vec![Some(one), None, Some(three), None]);
        assert!(multi.failed("b"));
        assert!(multi.failed("d"));
        assert!(multi.to_string().contains("key [b]"));
        assert!(multi.to_string().contains("key [d]"));
    }

    #[test]
    fn test_store_get_multi_reports_expired_keys() {
        let mut store = CacheStore::new(Duration::ZERO);
        put(&mut store, "live", "1", TTL);
        put(&mut store, "stale", "2", ONE_SEC);

        sleep(Duration::from_millis(1100));

        let err = store.get_multi(&["live", "stale", "absent"]).unwrap_err();
        let message = err.to_string();
        let CacheError::MultiGetFailed(multi) = err else {
            panic!("expected MultiGetFailed");
        };

        assert_eq!(multi.values, vec![Some(CacheValue::from("1")), None, None]);
        let expired = CacheError::KeyExpired("stale".into());
        let missing = CacheError::KeyNotExist("absent".into());
        let failures = vec![
            ("stale".to_string(), expired),
            ("absent".to_string(), missing),
        ];
        assert_eq!(multi.failures, failures);
        assert!(message.contains("key [stale] error: key is expired"));
        assert!(message.contains("key [absent] error: key does not exist"));
    }

    #[test]
    fn test_store_get_multi_all_present() {
        let mut store = CacheStore::new(Duration::ZERO);
        put(&mut store, "a", "1", TTL);

        let values = store.get_multi(&["a".to_string()]).unwrap();
        assert_eq!(values, vec![Some(CacheValue::from("1"))]);
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new(Duration::ZERO);
        put(&mut store, "a", "1", TTL);
        put(&mut store, "b", "2", TTL);

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new(Duration::ZERO);

        put(&mut store, "key1", "value1", ONE_SEC);
        put(&mut store, "key2", "value2", Duration::from_secs(10));

        // Wait for key1 to expire
        sleep(Duration::from_millis(1100));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_ok());
        let result = store.get("key1");
        assert!(matches!(result, Err(CacheError::KeyNotExist(_))));
    }
}
