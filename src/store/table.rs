//! Store implementation
//!
//! Sharded HashMap with one parking_lot Mutex per shard.

use std::collections::hash_map::{Entry, RandomState};
use std::collections::HashMap;
use std::hash::BuildHasher;

use parking_lot::{Mutex, MutexGuard};

use crate::error::CommandError;
use crate::hash::Hash;
use super::{Value, ValueType};

type Shard = HashMap<String, Value>;

/// The key → value store
pub struct Store {
    /// Lock shards, indexed by key hash
    shards: Vec<Mutex<Shard>>,

    /// Hasher used only for shard selection
    hasher: RandomState,
}

impl Store {
    /// Create an empty store with `shard_count` lock shards (at least 1)
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(HashMap::new()))
            .collect();

        Self {
            shards,
            hasher: RandomState::new(),
        }
    }

    /// Lock the shard owning `key`
    fn shard(&self, key: &str) -> MutexGuard<'_, Shard> {
        let index = (self.hasher.hash_one(key) % self.shards.len() as u64) as usize;
        self.shards[index].lock()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a snapshot of the value bound to `key`
    pub fn get(&self, key: &str) -> Option<Value> {
        self.shard(key).get(key).cloned()
    }

    /// Get the type of the value bound to `key`
    pub fn value_type(&self, key: &str) -> Option<ValueType> {
        self.shard(key).get(key).map(Value::value_type)
    }

    /// Check whether `key` is bound
    pub fn exists(&self, key: &str) -> bool {
        self.shard(key).contains_key(key)
    }

    /// Read one field of the hash at `key`
    ///
    /// A missing key reads as a missing field. A non-hash key is `WrongType`.
    pub fn get_field(&self, key: &str, field: &str) -> Result<Option<String>, CommandError> {
        match self.shard(key).get(key) {
            None => Ok(None),
            Some(Value::Hash(hash)) => Ok(hash.get_field(field).map(str::to_string)),
            Some(Value::Str(_)) => Err(CommandError::WrongType),
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Run `f` against the hash at `key`, creating an empty one if absent
    ///
    /// `f` receives the hash and whether this call created it. The whole call
    /// runs under the key's shard lock.
    ///
    /// - Key bound to a non-hash: `WrongType`, nothing is touched.
    /// - `f` fails on a hash this call created: the new hash is never bound,
    ///   so the store is left as it was.
    pub fn get_or_create_hash<R, F>(&self, key: &str, f: F) -> Result<R, CommandError>
    where
        F: FnOnce(&mut Hash, bool) -> Result<R, CommandError>,
    {
        let mut shard = self.shard(key);

        match shard.entry(key.to_string()) {
            Entry::Occupied(mut entry) => match entry.get_mut() {
                Value::Hash(hash) => f(hash, false),
                Value::Str(_) => Err(CommandError::WrongType),
            },
            Entry::Vacant(entry) => {
                let mut hash = Hash::new();
                let result = f(&mut hash, true)?;
                entry.insert(Value::Hash(hash));
                Ok(result)
            }
        }
    }

    /// Bind a string to `key`, replacing any existing value
    pub fn set_string(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.shard(&key).insert(key, Value::Str(value.into()));
    }

    /// Remove `key`, returning whether it was bound
    pub fn delete(&self, key: &str) -> bool {
        self.shard(key).remove(key).is_some()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of bound keys across all shards
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    /// Check if no keys are bound
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.lock().is_empty())
    }

    /// Number of lock shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(16)
    }
}
