//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::cache::CacheValue;

/// Lifetime given to entries stored "forever": ten years.
pub const FOREVER: Duration = Duration::from_secs(86400 * 365 * 10);

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: CacheValue,
    /// Time of the last successful write
    pub last_access: DateTime<Utc>,
    /// Absolute expiration; always finite
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    ///
    /// A TTL too large to represent saturates at the latest representable
    /// timestamp.
    pub fn new(value: CacheValue, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value,
            last_access: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks expiration against a given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        let remaining = self.expires_at - Utc::now();
        remaining.to_std().unwrap_or(Duration::ZERO)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new(CacheValue::from("test_value"), Duration::from_secs(60));

        assert_eq!(entry.value, CacheValue::from("test_value"));
        assert!(entry.expires_at > entry.last_access);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(CacheValue::from("test_value"), Duration::from_secs(1));

        assert!(!entry.is_expired());

        // Wait for expiration
        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(CacheValue::from("test_value"), Duration::from_secs(10));

        let remaining = entry.ttl_remaining();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_forever_is_ten_years_out() {
        let entry = CacheEntry::new(CacheValue::from(1i64), FOREVER);

        let nine_years = Utc::now() + TimeDelta::days(365 * 9);
        assert!(!entry.is_expired_at(nine_years));
        assert!(entry.is_expired_at(Utc::now() + TimeDelta::days(365 * 11)));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new(CacheValue::from(1i64), Duration::MAX);
        assert_eq!(entry.expires_at, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Utc::now();
        let entry = CacheEntry {
            value: CacheValue::from("test"),
            last_access: now,
            expires_at: now,
        };

        // Entry should be expired when current time >= expires_at
        assert!(
            entry.is_expired_at(now),
            "Entry should be expired at boundary"
        );
    }
}
