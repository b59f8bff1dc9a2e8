//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::fmt;

use thiserror::Error;

use crate::cache::CacheValue;

// == Cache Error Enum ==
/// Unified error type shared by every cache backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Key was never stored, or has been removed
    #[error("key does not exist: {0}")]
    KeyNotExist(String),

    /// Key was stored but its TTL has elapsed
    #[error("key is expired: {0}")]
    KeyExpired(String),

    /// Stored value is not one of the recognized integer kinds
    #[error("value of kind {0} is not an integer")]
    NotIntegerType(String),

    /// Incrementing would exceed the kind's maximum
    #[error("increment would overflow {0}")]
    IncrementOverflow(String),

    /// Decrementing would go below the kind's minimum
    #[error("decrement would overflow {0}")]
    DecrementOverflow(String),

    /// A background task could not be started
    #[error("no tokio runtime available: {0}")]
    NoRuntime(String),

    /// One or more keys of a batch read failed
    #[error("{0}")]
    MultiGetFailed(MultiGetError),
}

// == Multi Get Error ==
/// Aggregate failure of a batch read.
///
/// Carries the positional values that were retrieved alongside the per-key
/// causes, so callers can still use the successful subset.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiGetError {
    /// Values aligned with the requested keys, `None` for failed keys
    pub values: Vec<Option<CacheValue>>,
    /// Failing keys with their individual cause
    pub failures: Vec<(String, CacheError)>,
}

impl MultiGetError {
    /// Returns true if the given key is among the failures.
    pub fn failed(&self, key: &str) -> bool {
        self.failures.iter().any(|(k, _)| k == key)
    }

    /// Consumes the error, yielding the partial values.
    pub fn into_values(self) -> Vec<Option<CacheValue>> {
        self.values
    }
}

impl fmt::Display for MultiGetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, cause)) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "key [{}] error: {}", key, cause)?;
        }
        Ok(())
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
