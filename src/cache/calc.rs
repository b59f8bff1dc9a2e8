//! Counter Arithmetic Module
//!
//! Overflow-checked increment/decrement over the integer kinds of `CacheValue`.
//! The result always has the same kind as the input.

use crate::cache::CacheValue;
use crate::error::{CacheError, Result};

// == Increment ==
/// Adds one to an integer value.
///
/// # Errors
/// - `NotIntegerType` if the value is not an integer kind
/// - `IncrementOverflow` if the kind's maximum would be exceeded
pub fn increment(value: &CacheValue) -> Result<CacheValue> {
    let next = match *value {
        CacheValue::Int(n) => n.checked_add(1).map(CacheValue::Int),
        CacheValue::Int32(n) => n.checked_add(1).map(CacheValue::Int32),
        CacheValue::Int64(n) => n.checked_add(1).map(CacheValue::Int64),
        CacheValue::Uint(n) => n.checked_add(1).map(CacheValue::Uint),
        CacheValue::Uint32(n) => n.checked_add(1).map(CacheValue::Uint32),
        CacheValue::Uint64(n) => n.checked_add(1).map(CacheValue::Uint64),
        _ => return Err(CacheError::NotIntegerType(kind_of(value))),
    };

    next.ok_or_else(|| CacheError::IncrementOverflow(kind_of(value)))
}

// == Decrement ==
/// Subtracts one from an integer value.
///
/// # Errors
/// - `NotIntegerType` if the value is not an integer kind
/// - `DecrementOverflow` if the kind's minimum would be crossed
pub fn decrement(value: &CacheValue) -> Result<CacheValue> {
    let next = match *value {
        CacheValue::Int(n) => n.checked_sub(1).map(CacheValue::Int),
        CacheValue::Int32(n) => n.checked_sub(1).map(CacheValue::Int32),
        CacheValue::Int64(n) => n.checked_sub(1).map(CacheValue::Int64),
        CacheValue::Uint(n) => n.checked_sub(1).map(CacheValue::Uint),
        CacheValue::Uint32(n) => n.checked_sub(1).map(CacheValue::Uint32),
        CacheValue::Uint64(n) => n.checked_sub(1).map(CacheValue::Uint64),
        _ => return Err(CacheError::NotIntegerType(kind_of(value))),
    };

    next.ok_or_else(|| CacheError::DecrementOverflow(kind_of(value)))
}

fn kind_of(value: &CacheValue) -> String {
    value.kind().to_string()
}
