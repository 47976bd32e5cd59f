//! # hashkv
//!
//! An in-memory key-value server built around atomic hash field increments:
//! - Tagged values (strings and hashes) with strict type checks
//! - `HINCRBY` with integer validation and overflow detection
//! - Sharded locking so concurrent increments never lose updates
//! - Framed TCP command channel with ordered replies
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │               (thread per connection)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  request frame → reply frame
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Command Engine                             │
//! │        (parse → resolve key → type check → mutate)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Value Store                               │
//! │          (N shards, Mutex<HashMap<String, Value>>)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                ┌──────▼──────┐
//!                │  Hash Type  │
//!                │ field → str │
//!                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod hash;
pub mod store;
pub mod network;
pub mod protocol;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CommandError, KvError, Result};
pub use config::Config;
pub use engine::Engine;
pub use hash::Hash;
pub use protocol::{Command, Reply};
pub use store::{Store, Value, ValueType};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of hashkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
