//! hashkv Server Binary
//!
//! Starts the TCP server for hashkv.

use std::sync::Arc;

use clap::Parser;
use hashkv::network::Server;
use hashkv::{Config, Engine};
use tracing_subscriber::{fmt, EnvFilter};

/// hashkv Server
#[derive(Parser, Debug)]
#[command(name = "hashkv-server")]
#[command(about = "In-memory key-value server with atomic hash increments")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    listen: String,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,

    /// Number of lock shards in the value store
    #[arg(short, long, default_value = "16")]
    shards: usize,

    /// Idle read timeout per connection in milliseconds (0 disables)
    #[arg(short, long, default_value = "0")]
    read_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hashkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("hashkv Server v{}", hashkv::VERSION);
    tracing::info!("Listen address: {}", args.listen);
    tracing::info!("Store shards: {}", args.shards);

    let config = Config::builder()
        .listen_addr(&args.listen)
        .max_connections(args.max_connections)
        .shard_count(args.shards)
        .read_timeout_ms(args.read_timeout_ms)
        .build();

    let engine = Arc::new(Engine::new(config.clone()));

    let server = match Server::bind(config, engine) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
