//! TTL Cache - A uniform cache contract over interchangeable backends
//!
//! Ships an in-process TTL store with background reclamation, overflow-safe
//! counters, and a decorator that jitters expirations to avoid stampedes.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheValue, MemoryCache, RandomExpireCache};
pub use config::Config;
pub use error::{CacheError, MultiGetError, Result};
