//! TCP Server
//!
//! Accepts connections and hands each one to its own thread.

use std::collections::HashMap;
use std::io::{BufWriter, ErrorKind};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::sync::WaitGroup;
use parking_lot::Mutex;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{KvError, Result};
use crate::protocol::{write_reply, Reply};
use super::Connection;

/// How long the accept loop sleeps when no client is waiting
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// TCP server for hashkv
pub struct Server {
    config: Config,
    engine: Arc<Engine>,
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,
    active_connections: Arc<AtomicUsize>,

    /// Handles to every live socket, closed when the server stops
    live_streams: Arc<Mutex<HashMap<u64, TcpStream>>>,
    next_connection_id: AtomicU64,
}

/// Cloneable handle that stops a running server
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Signal the server to stop accepting and return from `run`
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Unregisters a connection when its thread ends
struct ConnectionGuard {
    id: u64,
    active: Arc<AtomicUsize>,
    live_streams: Arc<Mutex<HashMap<u64, TcpStream>>>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.live_streams.lock().remove(&self.id);
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Server {
    /// Bind the listen address from `config`
    ///
    /// Binding to port 0 picks a free port; see [`Server::local_addr`].
    pub fn bind(config: Config, engine: Arc<Engine>) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            KvError::Network(format!("failed to bind {}: {}", config.listen_addr, e))
        })?;
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            engine,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
            active_connections: Arc::new(AtomicUsize::new(0)),
            live_streams: Arc::new(Mutex::new(HashMap::new())),
            next_connection_id: AtomicU64::new(0),
        })
    }

    /// The address the server is listening on
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Get a handle that can stop the server from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown_handle().shutdown();
    }

    /// Number of connections currently being served
    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }

    /// Start the server (blocking)
    ///
    /// Returns after shutdown is requested. Open connections are closed from
    /// the server side and their threads joined before returning.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);

        let connections = WaitGroup::new();
        let shutdown = self.shutdown_handle();

        while !shutdown.is_shutdown() {
            match self.listener.accept() {
                Ok((stream, addr)) => self.dispatch(stream, addr, connections.clone()),
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
            }
        }

        tracing::info!(
            "Shutdown requested, waiting for {} connection(s)",
            self.active_connections()
        );
        self.close_live_streams();
        connections.wait();

        Ok(())
    }

    /// Start serving one accepted client, or turn it away if at capacity
    fn dispatch(&self, stream: TcpStream, addr: SocketAddr, wg: WaitGroup) {
        let active = self.active_connections.fetch_add(1, Ordering::SeqCst);
        if active >= self.config.max_connections {
            self.active_connections.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!("Rejecting {}: max connections ({}) reached", addr, self.config.max_connections);
            reject(stream);
            return;
        }
        let id = self.next_connection_id.fetch_add(1, Ordering::SeqCst);
        match stream.try_clone() {
            Ok(handle) => {
                self.live_streams.lock().insert(id, handle);
            }
            Err(e) => {
                self.active_connections.fetch_sub(1, Ordering::SeqCst);
                tracing::warn!("Dropping {}: could not clone socket: {}", addr, e);
                return;
            }
        }
        let guard = ConnectionGuard {
            id,
            active: Arc::clone(&self.active_connections),
            live_streams: Arc::clone(&self.live_streams),
        };

        let engine = Arc::clone(&self.engine);
        let read_ms = self.config.read_timeout_ms;
        let write_ms = self.config.write_timeout_ms;

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", addr))
            .spawn(move || {
                let _guard = guard;
                let _wg = wg;
                if let Err(e) = serve(stream, engine, read_ms, write_ms) {
                    tracing::debug!("Connection {} closed with error: {}", addr, e);
                }
            });

        if let Err(e) = spawned {
            tracing::warn!("Failed to spawn connection thread for {}: {}", addr, e);
        }
    }

    /// Shut down every live socket so blocked reads return EOF
    fn close_live_streams(&self) {
        for (_, stream) in self.live_streams.lock().drain() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

fn serve(stream: TcpStream, engine: Arc<Engine>, read_ms: u64, write_ms: u64) -> Result<()> {
    // accepted sockets may inherit the listener's non-blocking mode
    stream.set_nonblocking(false)?;

    let mut connection = Connection::new(stream, engine)?;
    connection.set_timeouts(read_ms, write_ms)?;
    connection.handle()
}

fn reject(stream: TcpStream) {
    let _ = stream.set_nonblocking(false);
    let mut writer = BufWriter::new(stream);
    let _ = write_reply(
        &mut writer,
        &Reply::error("ERR max number of clients reached"),
    );
}
