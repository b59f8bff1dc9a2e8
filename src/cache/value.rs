//! Cache Value Module
//!
//! Closed tagged representation of everything a cache entry can hold.

use serde::{Deserialize, Serialize};

// == Cache Value ==
/// A stored payload.
///
/// The integer kinds are kept distinct so counters preserve their width
/// across `incr`/`decr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CacheValue {
    Str(String),
    Bytes(Vec<u8>),
    /// Platform-width signed integer
    Int(isize),
    Int32(i32),
    Int64(i64),
    /// Platform-width unsigned integer
    Uint(usize),
    Uint32(u32),
    Uint64(u64),
    Float64(f64),
    Bool(bool),
}

impl CacheValue {
    /// Returns the kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            CacheValue::Str(_) => "string",
            CacheValue::Bytes(_) => "bytes",
            CacheValue::Int(_) => "int",
            CacheValue::Int32(_) => "int32",
            CacheValue::Int64(_) => "int64",
            CacheValue::Uint(_) => "uint",
            CacheValue::Uint32(_) => "uint32",
            CacheValue::Uint64(_) => "uint64",
            CacheValue::Float64(_) => "float64",
            CacheValue::Bool(_) => "bool",
        }
    }

    /// Returns true for the integer kinds accepted by `incr`/`decr`.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            CacheValue::Int(_)
                | CacheValue::Int32(_)
                | CacheValue::Int64(_)
                | CacheValue::Uint(_)
                | CacheValue::Uint32(_)
                | CacheValue::Uint64(_)
        )
    }

    // == Conversions ==
    /// Renders the value as a string. Bytes are decoded lossily as UTF-8.
    pub fn as_string(&self) -> String {
        match self {
            CacheValue::Str(s) => s.clone(),
            CacheValue::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            CacheValue::Int(n) => n.to_string(),
            CacheValue::Int32(n) => n.to_string(),
            CacheValue::Int64(n) => n.to_string(),
            CacheValue::Uint(n) => n.to_string(),
            CacheValue::Uint32(n) => n.to_string(),
            CacheValue::Uint64(n) => n.to_string(),
            CacheValue::Float64(f) => f.to_string(),
            CacheValue::Bool(b) => b.to_string(),
        }
    }

    /// Reads the value as an i64.
    ///
    /// Integers that fit are converted, numeric strings are parsed, anything
    /// else yields 0.
    pub fn as_int64(&self) -> i64 {
        match self {
            CacheValue::Int(n) => *n as i64,
            CacheValue::Int32(n) => i64::from(*n),
            CacheValue::Int64(n) => *n,
            CacheValue::Uint(n) => i64::try_from(*n).unwrap_or(0),
            CacheValue::Uint32(n) => i64::from(*n),
            CacheValue::Uint64(n) => i64::try_from(*n).unwrap_or(0),
            CacheValue::Str(s) => s.trim().parse().unwrap_or(0),
            CacheValue::Bytes(b) => std::str::from_utf8(b)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0),
            CacheValue::Float64(_) | CacheValue::Bool(_) => 0,
        }
    }

    /// Reads the value as a platform-width integer, 0 if it does not fit.
    pub fn as_int(&self) -> isize {
        isize::try_from(self.as_int64()).unwrap_or(0)
    }

    /// Reads the value as an f64. Non-numeric values yield 0.0.
    pub fn as_float64(&self) -> f64 {
        match self {
            CacheValue::Float64(f) => *f,
            CacheValue::Int(n) => *n as f64,
            CacheValue::Int32(n) => f64::from(*n),
            CacheValue::Int64(n) => *n as f64,
            CacheValue::Uint(n) => *n as f64,
            CacheValue::Uint32(n) => f64::from(*n),
            CacheValue::Uint64(n) => *n as f64,
            CacheValue::Str(s) => s.trim().parse().unwrap_or(0.0),
            CacheValue::Bytes(_) | CacheValue::Bool(_) => 0.0,
        }
    }

    /// Reads the value as a bool. Only `Bool` and "true"/"false" strings are
    /// recognized, anything else yields false.
    pub fn as_bool(&self) -> bool {
        match self {
            CacheValue::Bool(b) => *b,
            CacheValue::Str(s) => s.trim().parse().unwrap_or(false),
            _ => false,
        }
    }
}

// == From Implementations ==
impl From<String> for CacheValue {
    fn from(v: String) -> Self {
        CacheValue::Str(v)
    }
}

impl From<&str> for CacheValue {
    fn from(v: &str) -> Self {
        CacheValue::Str(v.to_string())
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(v: Vec<u8>) -> Self {
        CacheValue::Bytes(v)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(v: &[u8]) -> Self {
        CacheValue::Bytes(v.to_vec())
    }
}

impl From<isize> for CacheValue {
    fn from(v: isize) -> Self {
        CacheValue::Int(v)
    }
}

impl From<i32> for CacheValue {
    fn from(v: i32) -> Self {
        CacheValue::Int32(v)
    }
}

impl From<i64> for CacheValue {
    fn from(v: i64) -> Self {
        CacheValue::Int64(v)
    }
}

impl From<usize> for CacheValue {
    fn from(v: usize) -> Self {
        CacheValue::Uint(v)
    }
}

impl From<u32> for CacheValue {
    fn from(v: u32) -> Self {
        CacheValue::Uint32(v)
    }
}

impl From<u64> for CacheValue {
    fn from(v: u64) -> Self {
        CacheValue::Uint64(v)
    }
}

impl From<f64> for CacheValue {
    fn from(v: f64) -> Self {
        CacheValue::Float64(v)
    }
}

impl From<bool> for CacheValue {
    fn from(v: bool) -> Self {
        CacheValue::Bool(v)
    }
}
