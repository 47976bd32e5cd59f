//! Blocking client
//!
//! Sends command text over one persistent connection and reads the reply.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{KvError, Result};
use crate::protocol::{read_reply, write_request, Reply};

/// A connection to a hashkv server
///
/// Replies come back in the order commands were sent.
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .map_err(|e| KvError::Network(format!("failed to connect: {}", e)))?;
        stream.set_nodelay(true)?;

        Ok(Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: BufWriter::new(stream),
        })
    }

    /// Send one command and wait for its reply
    ///
    /// Command failures arrive as `Ok(Reply::Error(..))`; `Err` means the
    /// channel itself failed.
    pub fn send(&mut self, line: &str) -> Result<Reply> {
        write_request(&mut self.writer, line)?;
        read_reply(&mut self.reader)
    }

    /// Send already-split arguments, quoting any that need it
    pub fn send_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Reply> {
        let line = args
            .iter()
            .map(|arg| quote(arg.as_ref()))
            .collect::<Vec<_>>()
            .join(" ");
        self.send(&line)
    }
}

/// Quote an argument so the server's tokenizer reads it back unchanged
fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && !arg.starts_with('"')
        && !arg.chars().any(|c| c.is_ascii_whitespace());
    if plain {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
