//! Reply definitions
//!
//! Represents replies to clients. Exactly one reply is produced per command.

use std::fmt;

use crate::error::CommandError;

/// Reply kind codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReplyKind {
    Ok = 0x00,
    Integer = 0x01,
    Bulk = 0x02,
    Nil = 0x03,
    Error = 0x04,
}

impl TryFrom<u8> for ReplyKind {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        match byte {
            0x00 => Ok(ReplyKind::Ok),
            0x01 => Ok(ReplyKind::Integer),
            0x02 => Ok(ReplyKind::Bulk),
            0x03 => Ok(ReplyKind::Nil),
            0x04 => Ok(ReplyKind::Error),
            other => Err(other),
        }
    }
}

/// A reply to send to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Success without a value (`"OK"`)
    Ok,

    /// A native integer
    Integer(i64),

    /// A string value
    Bulk(String),

    /// Absent value
    Nil,

    /// Human-readable error text
    Error(String),
}

impl Reply {
    /// Create an ERROR reply
    pub fn error(message: impl Into<String>) -> Self {
        Reply::Error(message.into())
    }

    /// Get the reply kind
    pub fn kind(&self) -> ReplyKind {
        match self {
            Reply::Ok => ReplyKind::Ok,
            Reply::Integer(_) => ReplyKind::Integer,
            Reply::Bulk(_) => ReplyKind::Bulk,
            Reply::Nil => ReplyKind::Nil,
            Reply::Error(_) => ReplyKind::Error,
        }
    }

    /// Check if this is an error reply
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl From<CommandError> for Reply {
    fn from(err: CommandError) -> Self {
        Reply::Error(err.to_string())
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::Bulk(s) => write!(f, "\"{}\"", s),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Error(e) => write!(f, "(error) {}", e),
        }
    }
}
