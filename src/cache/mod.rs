//! Cache Module
//!
//! The cache contract, the in-process TTL store that implements it, and the
//! expiration jitter decorator.

pub mod calc;
mod entry;
mod memory;
mod random_expire;
mod store;
mod traits;
mod value;


// Re-export public types
pub use entry::{CacheEntry, FOREVER};
pub use memory::MemoryCache;
pub use random_expire::{default_offset, OffsetFn, RandomExpireCache};
pub use store::CacheStore;
pub use traits::Cache;
pub use value::CacheValue;
