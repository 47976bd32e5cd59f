//! Network Module
//!
//! TCP server, per-client connection handling, and a blocking client.
//!
//! ## Architecture
//! - Single acceptor thread polling a non-blocking listener
//! - One thread per connection, capped at `max_connections`
//! - Commands routed through Engine, replies written in arrival order

mod server;
mod connection;
mod client;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
pub use client::Client;
