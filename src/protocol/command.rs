//! Command definitions
//!
//! Parses command text into typed commands. Argument shape (arity, integer
//! literals) is validated here, before anything reaches the store.

use crate::error::CommandError;
use crate::hash::parse_i64;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    HIncrBy,
    HSet,
    HGet,
    Set,
    Del,
    Ping,
}

impl CommandType {
    /// Resolve a keyword (case-insensitive)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let command_type = match keyword.to_ascii_lowercase().as_str() {
            "hincrby" => CommandType::HIncrBy,
            "hset" => CommandType::HSet,
            "hget" => CommandType::HGet,
            "set" => CommandType::Set,
            "del" => CommandType::Del,
            "ping" => CommandType::Ping,
            _ => return None,
        };
        Some(command_type)
    }

    /// Lowercase command name, as used in error replies
    pub fn name(&self) -> &'static str {
        match self {
            CommandType::HIncrBy => "hincrby",
            CommandType::HSet => "hset",
            CommandType::HGet => "hget",
            CommandType::Set => "set",
            CommandType::Del => "del",
            CommandType::Ping => "ping",
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add `delta` to the integer in a hash field
    HIncrBy { key: String, field: String, delta: i64 },

    /// Set one or more hash fields
    HSet { key: String, pairs: Vec<(String, String)> },

    /// Get a hash field
    HGet { key: String, field: String },

    /// Bind a string value
    Set { key: String, value: String },

    /// Delete keys
    Del { keys: Vec<String> },

    /// Ping (health check), optionally echoing a message
    Ping { message: Option<String> },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::HIncrBy { .. } => CommandType::HIncrBy,
            Command::HSet { .. } => CommandType::HSet,
            Command::HGet { .. } => CommandType::HGet,
            Command::Set { .. } => CommandType::Set,
            Command::Del { .. } => CommandType::Del,
            Command::Ping { .. } => CommandType::Ping,
        }
    }

    /// Parse one line of command text
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        Self::from_args(tokenize(line)?)
    }

    /// Build a command from already-split arguments (keyword first)
    pub fn from_args(args: Vec<String>) -> Result<Command, CommandError> {
        let mut args = args.into_iter();
        let keyword = args.next().ok_or(CommandError::EmptyCommand)?;
        let command_type = CommandType::from_keyword(&keyword)
            .ok_or_else(|| CommandError::UnknownCommand(truncate_name(&keyword)))?;
        let args: Vec<String> = args.collect();

        let arity_error = || CommandError::WrongArity(command_type.name().to_string());

        match command_type {
            CommandType::HIncrBy => {
                let [key, field, delta] = exact::<3>(args).ok_or_else(arity_error)?;
                let delta = parse_i64(&delta).ok_or(CommandError::InvalidInteger)?;
                Ok(Command::HIncrBy { key, field, delta })
            }
            CommandType::HSet => {
                if args.len() < 3 || (args.len() - 1) % 2 != 0 {
                    return Err(arity_error());
                }
                let mut args = args.into_iter();
                let key = args.next().ok_or_else(arity_error)?;
                let mut pairs = Vec::with_capacity(args.len() / 2);
                while let (Some(field), Some(value)) = (args.next(), args.next()) {
                    pairs.push((field, value));
                }
                Ok(Command::HSet { key, pairs })
            }
            CommandType::HGet => {
                let [key, field] = exact::<2>(args).ok_or_else(arity_error)?;
                Ok(Command::HGet { key, field })
            }
            CommandType::Set => {
                let [key, value] = exact::<2>(args).ok_or_else(arity_error)?;
                Ok(Command::Set { key, value })
            }
            CommandType::Del => {
                if args.is_empty() {
                    return Err(arity_error());
                }
                Ok(Command::Del { keys: args })
            }
            CommandType::Ping => {
                if args.len() > 1 {
                    return Err(arity_error());
                }
                Ok(Command::Ping {
                    message: args.into_iter().next(),
                })
            }
        }
    }
}

/// Longest command name echoed back in an unknown-command error
pub const MAX_ECHOED_NAME: usize = 128;

/// Cut `name` to at most `MAX_ECHOED_NAME` bytes on a char boundary
fn truncate_name(name: &str) -> String {
    let mut end = name.len().min(MAX_ECHOED_NAME);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}

/// Take exactly `N` arguments
fn exact<const N: usize>(args: Vec<String>) -> Option<[String; N]> {
    args.try_into().ok()
}

/// Split command text into arguments
///
/// Arguments are separated by ASCII whitespace. An argument that starts with
/// `"` runs to the next unescaped `"` and may contain whitespace; inside it,
/// `\"` and `\\` are escapes. A closing quote must end the argument.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut args = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_ascii_whitespace()).is_some() {}

        let Some(&first) = chars.peek() else {
            break;
        };

        let mut arg = String::new();

        if first == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('\\') => match chars.next() {
                        Some(escaped @ ('"' | '\\')) => arg.push(escaped),
                        Some(other) => {
                            arg.push('\\');
                            arg.push(other);
                        }
                        None => return Err(CommandError::UnbalancedQuotes),
                    },
                    Some('"') => break,
                    Some(c) => arg.push(c),
                    None => return Err(CommandError::UnbalancedQuotes),
                }
            }
            // closing quote must be followed by whitespace or end of line
            if chars.peek().is_some_and(|c| !c.is_ascii_whitespace()) {
                return Err(CommandError::UnbalancedQuotes);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_ascii_whitespace()) {
                arg.push(c);
            }
        }

        args.push(arg);
    }

    Ok(args)
}
