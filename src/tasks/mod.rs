//! Background Tasks Module
//!
//! Contains background tasks owned by a cache instance.
//!
//! # Tasks
//! - TTL Sweep: Removes expired cache entries at configured intervals

mod sweep;

pub use sweep::{spawn_sweep_task, SweepHandle};
