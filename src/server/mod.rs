//! Async TCP server using Tokio.
//!
//! Accepts TCP connections and serves exactly one request per connection:
//! read the request head, hand the bytes to the dispatch core, write the
//! reply, close. Connections are served concurrently on spawned tasks; the
//! response cache is the only state they share.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::BytesMut;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::context::Context;
use crate::router;

/// Errors produced by the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Maximum size of a request head we will buffer before dropping the
/// connection.
const MAX_HEAD_SIZE: usize = 64 * 1024;

/// Initial read buffer capacity per connection.
const INITIAL_BUF_SIZE: usize = 1024;

/// The minihttpd server.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use minihttpd::config::Config;
/// use minihttpd::context::Context;
/// use minihttpd::fetch::HttpFetcher;
/// use minihttpd::files::DiskStore;
/// use minihttpd::server::Server;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env();
///     let addr = config.listen_addr.clone();
///     let ctx = Arc::new(Context::new(
///         config,
///         Arc::new(HttpFetcher::new()?),
///         Arc::new(DiskStore::new(".")),
///     ));
///     Server::bind(&addr).await?.run(ctx).await?;
///     Ok(())
/// }
/// ```
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Server {
    /// Binds the server to the given TCP address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address cannot be bound
    /// (e.g. port already in use, insufficient permissions).
    pub async fn bind(addr: impl AsRef<str>) -> Result<Self, ServerError> {
        let addr = addr.as_ref();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.to_owned(),
                source: e,
            })?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Starts accepting connections.
    ///
    /// Runs until the process is terminated. Accept errors are logged and
    /// skipped; a failing connection never takes down the accept loop.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Io`] if the TCP listener itself fails.
    pub async fn run(self, ctx: Arc<Context>) -> Result<(), ServerError> {
        info!(address = %self.local_addr, "minihttpd listening");

        loop {
            let (stream, peer_addr) = match self.listener.accept().await {
                Ok(pair) => pair,
                Err(e) => {
                    error!(error = %e, "failed to accept connection");
                    continue;
                }
            };

            debug!(peer = %peer_addr, "connection accepted");
            let ctx = Arc::clone(&ctx);

            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer_addr, ctx).await {
                    warn!(peer = %peer_addr, error = %e, "connection closed with error");
                }
            });
        }
    }
}

/// Serves one request on one connection: read head, respond, close.
async fn handle_connection(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    ctx: Arc<Context>,
) -> Result<(), std::io::Error> {
    let mut buf = BytesMut::with_capacity(INITIAL_BUF_SIZE);
    let mut scanned = 0;

    loop {
        let bytes_read = stream.read_buf(&mut buf).await?;

        // EOF: hand over whatever arrived; the parser degrades gracefully.
        if bytes_read == 0 {
            debug!(peer = %peer_addr, "stream ended before blank line");
            break;
        }

        if head_complete_from(&buf, scanned) {
            break;
        }
        scanned = buf.len();

        if buf.len() > MAX_HEAD_SIZE {
            warn!(peer = %peer_addr, "request head too large, dropping connection");
            return Ok(());
        }
    }

    let reply = router::respond(&buf, &ctx).await;
    stream.write_all(&reply).await?;
    stream.flush().await?;
    stream.shutdown().await?;

    debug!(peer = %peer_addr, bytes = reply.len(), "response written, closing");
    Ok(())
}

// The head ends at the first blank line, with or without carriage returns.
// Only bytes at or after `scanned` are new; a terminator spanning the
// previous read boundary starts at most two bytes before it, so each byte
// is examined a bounded number of times across reads.
fn head_complete_from(buf: &[u8], scanned: usize) -> bool {
    let tail = &buf[scanned.saturating_sub(2)..];
    tail.windows(2).any(|w| w == b"\n\n") || tail.windows(3).any(|w| w == b"\n\r\n")
}
