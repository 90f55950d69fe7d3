//! `sv-transport` — framed request/response channel to the simulation server.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`framing`]   | `Framing` trait, `SentinelFraming`, `END_OF_MESSAGE`      |
//! | [`command`]   | `Command`, `NO_DATA_REPLY`, `CLOSE_NOTICE`                |
//! | [`config`]    | `Endpoint`, `TransportConfig`                             |
//! | [`tcp`]       | `Transport` trait, `TcpTransport`, `Connection`           |
//! | [`error`]     | `TransportError`, `FailureKind`, `TransportResult<T>`     |
//!
//! # Wire format
//!
//! Every message is plain ASCII text followed by the single byte `0x04`:
//!
//! ```text
//! client → server   send_data 3\x04
//! server → client   kod_obce,pocet_obyvatel,pocet_nakazenych,datum\n
//!                   554,1200,4,3\n
//!                   ...\x04
//! client → server   I'LL BE BACK\x04          (close notice)
//! ```
//!
//! Two request modes are offered: *single-shot* through [`TcpTransport`]
//! (a fresh connection per exchange) and *bound* through a [`Connection`]
//! the caller keeps open across several requests.
//!
//! There is no retry inside this crate.  Every failure is returned as a
//! tagged [`TransportError`]; the caller decides when to try again.

pub mod command;
pub mod config;
pub mod error;
pub mod framing;
pub mod tcp;

#[cfg(test)]
mod tests;

pub use command::{CLOSE_NOTICE, Command, NO_DATA_REPLY};
pub use config::{Endpoint, TransportConfig};
pub use error::{FailureKind, IoOp, TransportError, TransportResult};
pub use framing::{END_OF_MESSAGE, Framing, SentinelFraming};
pub use tcp::{Connection, TcpTransport, Transport};
