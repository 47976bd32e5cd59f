//! Error types for hashkv
//!
//! Two layers:
//! - [`CommandError`]: failures of a single command. Their `Display` text is
//!   exactly what the client receives as the error reply.
//! - [`KvError`]: everything else (I/O, framing, configuration), plus
//!   command errors lifted through `?`.

use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Error raised while executing one command
///
/// None of these are fatal to the process or the connection. The store is
/// left exactly as it was before the failing command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    // -------------------------------------------------------------------------
    // Type / Value Errors
    // -------------------------------------------------------------------------
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    #[error("ERR hash value is not an integer")]
    NotAnInteger,

    #[error("ERR increment or decrement would overflow")]
    IncrementOverflow,

    // -------------------------------------------------------------------------
    // Syntax Errors
    // -------------------------------------------------------------------------
    #[error("ERR value is not an integer or out of range")]
    InvalidInteger,

    #[error("ERR wrong number of arguments for '{0}' command")]
    WrongArity(String),

    #[error("ERR unknown command '{0}'")]
    UnknownCommand(String),

    #[error("ERR empty command")]
    EmptyCommand,

    #[error("ERR Protocol error: unbalanced quotes in request")]
    UnbalancedQuotes,
}

impl CommandError {
    /// True for errors raised before the command reached the store
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            CommandError::InvalidInteger
                | CommandError::WrongArity(_)
                | CommandError::UnknownCommand(_)
                | CommandError::EmptyCommand
                | CommandError::UnbalancedQuotes
        )
    }
}

/// Unified error type for hashkv operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error(transparent)]
    Command(#[from] CommandError),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
