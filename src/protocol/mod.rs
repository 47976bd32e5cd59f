//! Protocol Module
//!
//! The command channel: textual commands in, typed replies out.
//!
//! ## Command Text
//! One command per request, keyword first, case-insensitive keyword,
//! whitespace-separated arguments (double quotes group an argument):
//! ```text
//! HINCRBY key field1 10
//! HSET user "display name" "Ada L"
//! ```
//!
//! ## Request Frame
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Kind (1) │ Len (4)  │   UTF-8 command text        │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ## Reply Frame
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Kind (1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Reply Kinds
//! - 0x00: OK       - Payload: empty
//! - 0x01: INTEGER  - Payload: i64 (8 bytes, big-endian)
//! - 0x02: BULK     - Payload: UTF-8 string
//! - 0x03: NIL      - Payload: empty
//! - 0x04: ERROR    - Payload: UTF-8 error text

mod command;
mod reply;
mod codec;

pub use command::{tokenize, Command, CommandType, MAX_ECHOED_NAME};
pub use reply::{Reply, ReplyKind};
pub use codec::{
    encode_request, decode_request, encode_reply, decode_reply,
    read_request, write_request, read_reply, write_reply,
    HEADER_SIZE, MAX_PAYLOAD_SIZE, REQUEST_KIND,
};
