//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! Both directions share one header layout:
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Kind (1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! - Request: kind is always [`REQUEST_KIND`], payload is the command text.
//! - Reply: kind is a [`ReplyKind`], payload depends on the kind.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{KvError, Result};
use super::{Reply, ReplyKind};

/// Header size: 1 byte kind + 4 bytes length
pub const HEADER_SIZE: usize = 5;

/// Maximum payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

/// Kind byte of a request frame (textual command)
pub const REQUEST_KIND: u8 = 0x01;

/// Integer payload size
const INTEGER_SIZE: usize = 8;

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode command text as a request frame
///
/// Fails without producing any bytes if the text exceeds `MAX_PAYLOAD_SIZE`.
pub fn encode_request(line: &str) -> Result<Vec<u8>> {
    let len = encoded_len(line.len())?;

    let mut frame = BytesMut::with_capacity(HEADER_SIZE + line.len());
    frame.put_u8(REQUEST_KIND);
    frame.put_u32(len);
    frame.put_slice(line.as_bytes());
    Ok(frame.to_vec())
}

/// Decode a request frame into command text
pub fn decode_request(bytes: &[u8]) -> Result<String> {
    let (kind, payload) = split_frame(bytes)?;

    if kind != REQUEST_KIND {
        return Err(KvError::Protocol(format!(
            "Unknown request kind: 0x{:02x}",
            kind
        )));
    }

    String::from_utf8(payload.to_vec())
        .map_err(|_| KvError::Protocol("Request is not valid UTF-8".to_string()))
}

// =============================================================================
// Reply Encoding/Decoding
// =============================================================================

/// Encode a reply to bytes
///
/// Fails without producing any bytes if the payload exceeds
/// `MAX_PAYLOAD_SIZE`, so an oversized reply never reaches the stream.
pub fn encode_reply(reply: &Reply) -> Result<Vec<u8>> {
    let mut frame = BytesMut::with_capacity(HEADER_SIZE + INTEGER_SIZE);
    frame.put_u8(reply.kind() as u8);

    match reply {
        Reply::Ok | Reply::Nil => frame.put_u32(0),
        Reply::Integer(n) => {
            frame.put_u32(INTEGER_SIZE as u32);
            frame.put_i64(*n);
        }
        Reply::Bulk(text) | Reply::Error(text) => {
            frame.put_u32(encoded_len(text.len())?);
            frame.put_slice(text.as_bytes());
        }
    }

    Ok(frame.to_vec())
}

/// Decode a reply from bytes
pub fn decode_reply(bytes: &[u8]) -> Result<Reply> {
    let (kind_byte, mut payload) = split_frame(bytes)?;

    let kind = ReplyKind::try_from(kind_byte).map_err(|byte| {
        KvError::Protocol(format!("Unknown reply kind: 0x{:02x}", byte))
    })?;

    match kind {
        ReplyKind::Ok | ReplyKind::Nil if !payload.is_empty() => Err(KvError::Protocol(format!(
            "{:?} reply: unexpected payload of {} bytes",
            kind,
            payload.len()
        ))),
        ReplyKind::Ok => Ok(Reply::Ok),
        ReplyKind::Nil => Ok(Reply::Nil),
        ReplyKind::Integer => {
            if payload.len() != INTEGER_SIZE {
                return Err(KvError::Protocol(format!(
                    "Integer reply: expected {} bytes, got {}",
                    INTEGER_SIZE,
                    payload.len()
                )));
            }
            Ok(Reply::Integer(payload.get_i64()))
        }
        ReplyKind::Bulk => Ok(Reply::Bulk(utf8_payload(payload)?)),
        ReplyKind::Error => Ok(Reply::Error(utf8_payload(payload)?)),
    }
}

fn utf8_payload(payload: &[u8]) -> Result<String> {
    String::from_utf8(payload.to_vec())
        .map_err(|_| KvError::Protocol("Reply payload is not valid UTF-8".to_string()))
}

/// Validate a complete frame and split it into (kind, payload)
fn split_frame(bytes: &[u8]) -> Result<(u8, &[u8])> {
    if bytes.len() < HEADER_SIZE {
        return Err(KvError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut header = &bytes[..HEADER_SIZE];
    let kind = header.get_u8();
    let payload_len = check_payload_len(header.get_u32())?;

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(KvError::Protocol(format!(
            "Incomplete payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    Ok((kind, &bytes[HEADER_SIZE..total_len]))
}

/// Length field for an outgoing payload of `len` bytes
fn encoded_len(len: usize) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|len| *len <= MAX_PAYLOAD_SIZE)
        .ok_or_else(|| {
            KvError::Protocol(format!(
                "Payload too large: {} bytes (max {})",
                len, MAX_PAYLOAD_SIZE
            ))
        })
}

fn check_payload_len(len: u32) -> Result<usize> {
    if len > MAX_PAYLOAD_SIZE {
        return Err(KvError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            len, MAX_PAYLOAD_SIZE
        )));
    }
    Ok(len as usize)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one complete frame (header + payload) from a stream
///
/// Blocks until the frame is complete or an error occurs
fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let payload_len = check_payload_len((&header[1..]).get_u32())?;

    let mut frame = vec![0u8; HEADER_SIZE + payload_len];
    frame[..HEADER_SIZE].copy_from_slice(&header);
    if payload_len > 0 {
        reader.read_exact(&mut frame[HEADER_SIZE..])?;
    }

    Ok(frame)
}

/// Read a complete request from a stream
pub fn read_request<R: Read>(reader: &mut R) -> Result<String> {
    let frame = read_frame(reader)?;
    decode_request(&frame)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(&encode_request(line)?)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete reply from a stream
pub fn read_reply<R: Read>(reader: &mut R) -> Result<Reply> {
    let frame = read_frame(reader)?;
    decode_reply(&frame)
}

/// Write a reply to a stream
pub fn write_reply<W: Write>(writer: &mut W, reply: &Reply) -> Result<()> {
    writer.write_all(&encode_reply(reply)?)?;
    writer.flush()?;
    Ok(())
}
