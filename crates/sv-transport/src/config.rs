//! Transport destination and timeouts.

use std::fmt;
use std::time::Duration;

/// Default simulation server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default simulation server port.
pub const DEFAULT_PORT: u16 = 4242;

/// Where the simulation server listens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Timeouts and limits applied to every connection.
///
/// Every timeout bounds one socket operation, so a sync cycle can never hang
/// longer than `connect_timeout + write_timeout + read_timeout` per blocking
/// call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    pub connect_timeout:   Duration,
    pub read_timeout:      Duration,
    pub write_timeout:     Duration,
    /// Largest reply accepted before the exchange is abandoned.
    pub max_message_bytes: usize,
}

impl TransportConfig {
    /// Use `timeout` for connect, read and write alike.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            connect_timeout: timeout,
            read_timeout:    timeout,
            write_timeout:   timeout,
            ..Self::default()
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout:   Duration::from_secs(5),
            read_timeout:      Duration::from_secs(10),
            write_timeout:     Duration::from_secs(5),
            max_message_bytes: 64 * 1024 * 1024,
        }
    }
}
