//! Transport error taxonomy.

use std::fmt;

use thiserror::Error;

/// The socket operation that failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IoOp {
    Connect,
    Write,
    Read,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IoOp::Connect => "connect",
            IoOp::Write => "write",
            IoOp::Read => "read",
        })
    }
}

/// Coarse classification used by callers deciding how to report a failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// No connection was established (DNS, refused, connect timeout).
    Connect,
    /// The connection broke mid-exchange (timeout, read or write error).
    Io,
    /// The caller handed over a payload that cannot be framed.
    Payload,
}

/// Errors produced by `sv-transport`.
///
/// None of these are fatal to the process.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not resolve {endpoint}: {reason}")]
    Resolve { endpoint: String, reason: String },

    #[error("connection to {endpoint} refused")]
    Refused { endpoint: String },

    #[error("could not connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source:   std::io::Error,
    },

    #[error("{op} timed out")]
    Timeout { op: IoOp },

    #[error("{op} failed: {source}")]
    Io {
        op:     IoOp,
        #[source]
        source: std::io::Error,
    },

    #[error("connection closed by peer after {received} bytes without end-of-message")]
    Closed { received: usize },

    #[error("message exceeded {limit} bytes without end-of-message")]
    TooLarge { limit: usize },

    #[error("payload contains the end-of-message byte at offset {offset}")]
    SentinelInPayload { offset: usize },
}

impl TransportError {
    pub fn kind(&self) -> FailureKind {
        match self {
            TransportError::Resolve { .. }
            | TransportError::Refused { .. }
            | TransportError::Connect { .. }
            | TransportError::Timeout { op: IoOp::Connect } => FailureKind::Connect,
            TransportError::SentinelInPayload { .. } => FailureKind::Payload,
            _ => FailureKind::Io,
        }
    }

    /// Map an I/O error from `op`, folding the platform's timeout kinds into
    /// [`TransportError::Timeout`].
    pub(crate) fn from_io(op: IoOp, source: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match source.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => TransportError::Timeout { op },
            _ => TransportError::Io { op, source },
        }
    }
}

/// Alias for `Result<T, TransportError>`.
pub type TransportResult<T> = Result<T, TransportError>;
