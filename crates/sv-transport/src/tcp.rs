//! TCP transport backend.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use tracing::{debug, trace};

use crate::{
    CLOSE_NOTICE, Endpoint, Framing, IoOp, SentinelFraming, TransportConfig, TransportError,
    TransportResult,
};

const READ_CHUNK: usize = 64 * 1024;

// ── Trait ─────────────────────────────────────────────────────────────────────

/// A single-shot request channel.
///
/// Each call opens its own connection, performs one exchange and closes it.
/// Implemented by [`TcpTransport`]; tests substitute scripted channels.
pub trait Transport {
    /// Send `payload` and return the complete reply, terminator included.
    fn request(&self, payload: &[u8]) -> TransportResult<Vec<u8>>;

    /// Send `payload` without waiting for a reply.
    fn notify(&self, payload: &[u8]) -> TransportResult<()>;
}

// ── TcpTransport ──────────────────────────────────────────────────────────────

/// Opens connections to one [`Endpoint`].
///
/// Connections are never pooled: single-shot calls open and close a fresh
/// socket, and [`connect`][Self::connect] hands out a [`Connection`] for
/// callers that bind several requests to one socket.
#[derive(Clone, Debug)]
pub struct TcpTransport<F: Framing = SentinelFraming> {
    endpoint: Endpoint,
    config:   TransportConfig,
    framing:  F,
}

impl TcpTransport<SentinelFraming> {
    pub fn new(endpoint: Endpoint, config: TransportConfig) -> Self {
        Self::with_framing(endpoint, config, SentinelFraming)
    }
}

impl<F: Framing> TcpTransport<F> {
    pub fn with_framing(endpoint: Endpoint, config: TransportConfig, framing: F) -> Self {
        Self { endpoint, config, framing }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Resolve the endpoint and open a connection with timeouts applied.
    pub fn connect(&self) -> TransportResult<Connection<F>> {
        let endpoint = self.endpoint.to_string();
        let addrs: Vec<SocketAddr> = (self.endpoint.host.as_str(), self.endpoint.port)
            .to_socket_addrs()
            .map_err(|e| TransportError::Resolve {
                endpoint: endpoint.clone(),
                reason:   e.to_string(),
            })?
            .collect();
        if addrs.is_empty() {
            return Err(TransportError::Resolve {
                endpoint,
                reason: "no addresses resolved".into(),
            });
        }

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.config.connect_timeout) {
                Ok(stream) => {
                    debug!(%addr, "connected to simulation server");
                    return self.configure(stream, endpoint);
                }
                Err(e) => {
                    trace!(%addr, error = %e, "connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        // `addrs` was non-empty, so at least one attempt recorded an error.
        let err = last_err.unwrap_or_else(|| ErrorKind::NotConnected.into());
        Err(match err.kind() {
            ErrorKind::ConnectionRefused => TransportError::Refused { endpoint },
            ErrorKind::TimedOut | ErrorKind::WouldBlock => TransportError::Timeout { op: IoOp::Connect },
            _ => TransportError::Connect { endpoint, source: err },
        })
    }

    fn configure(&self, stream: TcpStream, endpoint: String) -> TransportResult<Connection<F>> {
        stream
            .set_read_timeout(Some(self.config.read_timeout))
            .map_err(|e| TransportError::Connect { endpoint: endpoint.clone(), source: e })?;
        stream
            .set_write_timeout(Some(self.config.write_timeout))
            .map_err(|e| TransportError::Connect { endpoint: endpoint.clone(), source: e })?;
        // Requests are tiny; do not let Nagle hold them back.
        let _ = stream.set_nodelay(true);
        Ok(Connection {
            stream,
            endpoint,
            framing: self.framing.clone(),
            max_message_bytes: self.config.max_message_bytes,
            open: true,
        })
    }
}

impl<F: Framing> Transport for TcpTransport<F> {
    fn request(&self, payload: &[u8]) -> TransportResult<Vec<u8>> {
        let mut conn = self.connect()?;
        let reply = conn.request(payload);
        conn.close();
        reply
    }

    fn notify(&self, payload: &[u8]) -> TransportResult<()> {
        let mut conn = self.connect()?;
        let sent = conn.send(payload);
        conn.close();
        sent
    }
}

// ── Connection ────────────────────────────────────────────────────────────────

/// An open connection to the simulation server.
///
/// Dropping a connection closes it the same way [`close`][Self::close] does.
#[derive(Debug)]
pub struct Connection<F: Framing = SentinelFraming> {
    stream:            TcpStream,
    endpoint:          String,
    framing:           F,
    max_message_bytes: usize,
    open:              bool,
}

impl<F: Framing> Connection<F> {
    /// Frame and write one message.
    pub fn send(&mut self, payload: &[u8]) -> TransportResult<()> {
        let mut wire = Vec::new();
        self.framing.encode(payload, &mut wire)?;
        self.stream
            .write_all(&wire)
            .and_then(|()| self.stream.flush())
            .map_err(|e| TransportError::from_io(IoOp::Write, e))?;
        debug!(
            endpoint = %self.endpoint,
            message = %String::from_utf8_lossy(self.framing.strip(&wire)),
            "message sent"
        );
        Ok(())
    }

    /// Read until one complete message has arrived.
    ///
    /// The returned buffer still ends with the framing terminator; callers
    /// strip it.
    pub fn receive(&mut self) -> TransportResult<Vec<u8>> {
        let mut buf = Vec::new();
        let mut chunk = vec![0u8; READ_CHUNK];
        loop {
            let n = match self.stream.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransportError::from_io(IoOp::Read, e)),
            };
            if n == 0 {
                return Err(TransportError::Closed { received: buf.len() });
            }
            buf.extend_from_slice(&chunk[..n]);
            if self.framing.is_complete(&buf) {
                debug!(endpoint = %self.endpoint, bytes = buf.len(), "message received");
                return Ok(buf);
            }
            if buf.len() > self.max_message_bytes {
                return Err(TransportError::TooLarge { limit: self.max_message_bytes });
            }
        }
    }

    /// Bound-mode exchange: send `payload` and read the reply on this
    /// connection.
    pub fn request(&mut self, payload: &[u8]) -> TransportResult<Vec<u8>> {
        self.send(payload)?;
        self.receive()
    }

    /// Send the close notice (best effort) and shut the socket down.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        let mut wire = Vec::new();
        let notice = self
            .framing
            .encode(CLOSE_NOTICE, &mut wire)
            .and_then(|()| {
                self.stream
                    .write_all(&wire)
                    .map_err(|e| TransportError::from_io(IoOp::Write, e))
            });
        if let Err(e) = notice {
            debug!(endpoint = %self.endpoint, error = %e, "close notice not delivered");
        }
        let _ = self.stream.shutdown(Shutdown::Both);
        debug!(endpoint = %self.endpoint, "disconnected");
    }
}

impl<F: Framing> Drop for Connection<F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
