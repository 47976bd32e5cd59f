//! Store Module
//!
//! The process-wide key → value mapping.
//!
//! ## Responsibilities
//! - Own every key binding and every hash reachable from it
//! - Tag each value with exactly one type
//! - Serialize read-modify-write per key
//!
//! ## Concurrency Model
//! Keys are hashed onto a fixed set of shards, each a
//! `parking_lot::Mutex<HashMap<String, Value>>`:
//!
//! ```text
//!   key ──hash──▶ shard[i] ──lock──▶ HashMap<String, Value>
//!                                      │
//!                                      ├── "counter" → Hash { f1: "15" }
//!                                      └── "name"    → Str("value")
//! ```
//!
//! A command holds its shard lock for the whole read-check-write, so two
//! increments on the same field can never interleave. Hashes are never handed
//! out by reference; callers reach them only through closures that run under
//! the lock.

mod table;

pub use table::Store;

use crate::hash::Hash;

/// A value bound to a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A plain string scalar
    Str(String),

    /// A field → string mapping
    Hash(Hash),
}

impl Value {
    /// Get the value's type tag
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Str(_) => ValueType::String,
            Value::Hash(_) => ValueType::Hash,
        }
    }
}

/// Type tag of a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Hash,
}

impl ValueType {
    /// Lowercase type name
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Hash => "hash",
        }
    }
}
