//! Engine Module
//!
//! The command engine that sits between the channel and the store.
//!
//! ## Responsibilities
//! - Parse command text into typed commands
//! - Resolve keys in the store and check their types
//! - Run the hash field increment algorithm
//! - Turn every outcome into exactly one reply

use crate::config::Config;
use crate::error::CommandError;
use crate::protocol::{Command, Reply};
use crate::store::Store;

/// The command engine
///
/// ## Concurrency Model
///
/// The engine holds no locks of its own. Every command that reads and then
/// writes a key does so inside a single store call, which holds the key's
/// shard lock for the whole operation. Share the engine as `Arc<Engine>`.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// The key → value store
    store: Store,
}

impl Engine {
    /// Create an engine with an empty store
    pub fn new(config: Config) -> Self {
        let store = Store::new(config.shard_count);
        Self { config, store }
    }

    /// Parse and execute one line of command text
    ///
    /// Never fails: parse and execution errors become error replies.
    pub fn execute_line(&self, line: &str) -> Reply {
        let result = Command::parse(line).and_then(|command| self.execute(command));

        match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::trace!("Command {:?} failed: {}", line, e);
                Reply::from(e)
            }
        }
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&self, command: Command) -> Result<Reply, CommandError> {
        match command {
            Command::HIncrBy { key, field, delta } => {
                self.hincrby(&key, &field, delta).map(Reply::Integer)
            }
            Command::HSet { key, pairs } => self.hset(&key, &pairs).map(|n| Reply::Integer(n as i64)),
            Command::HGet { key, field } => Ok(self
                .hget(&key, &field)?
                .map_or(Reply::Nil, Reply::Bulk)),
            Command::Set { key, value } => {
                self.set(key, value);
                Ok(Reply::Ok)
            }
            Command::Del { keys } => Ok(Reply::Integer(self.del(&keys) as i64)),
            Command::Ping { message } => Ok(message.map_or_else(
                || Reply::Bulk("PONG".to_string()),
                Reply::Bulk,
            )),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Add `delta` to the integer stored in `field` of the hash at `key`
    ///
    /// Steps:
    /// 1. Resolve the hash at `key`, creating an empty one if absent
    /// 2. Reject a key that holds another type (`WrongType`)
    /// 3. Read the field (missing = 0), parse, overflow-check, write back
    ///
    /// Any failure leaves the store unchanged.
    pub fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64, CommandError> {
        self.store.get_or_create_hash(key, |hash, created| {
            let result = hash.increment_field(field, delta);
            if created && result.is_ok() {
                tracing::trace!("HINCRBY created hash at {:?}", key);
            }
            result
        })
    }

    /// Set hash fields, returning how many were newly created
    pub fn hset(&self, key: &str, pairs: &[(String, String)]) -> Result<usize, CommandError> {
        self.store.get_or_create_hash(key, |hash, created| {
            if created {
                tracing::trace!("HSET created hash at {:?}", key);
            }
            Ok(pairs
                .iter()
                .map(|(field, value)| hash.set_field(field.as_str(), value.as_str()))
                .sum())
        })
    }

    /// Get a hash field
    pub fn hget(&self, key: &str, field: &str) -> Result<Option<String>, CommandError> {
        self.store.get_field(key, field)
    }

    /// Bind a string value, replacing whatever `key` held
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.store.set_string(key, value);
    }

    /// Delete keys, returning how many existed
    pub fn del(&self, keys: &[String]) -> usize {
        keys.iter().filter(|key| self.store.delete(key)).count()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
