//! Message framing.
//!
//! The framing is isolated behind [`Framing`] so the rest of the dashboard
//! never looks at terminator bytes directly.  [`SentinelFraming`] is the only
//! implementation the simulation server speaks today.

use crate::{TransportError, TransportResult};

/// Reserved end-of-message byte (ASCII EOT).
pub const END_OF_MESSAGE: u8 = 0x04;

/// How logical messages are delimited on the byte stream.
pub trait Framing: Clone + Send + Sync {
    /// Append the wire form of `payload` to `out`.
    fn encode(&self, payload: &[u8], out: &mut Vec<u8>) -> TransportResult<()>;

    /// `true` once `buf` holds one complete message.
    fn is_complete(&self, buf: &[u8]) -> bool;

    /// Remove framing bytes from a complete message.
    fn strip<'a>(&self, message: &'a [u8]) -> &'a [u8];
}

/// Terminates every message with [`END_OF_MESSAGE`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SentinelFraming;

impl Framing for SentinelFraming {
    fn encode(&self, payload: &[u8], out: &mut Vec<u8>) -> TransportResult<()> {
        // A payload may already carry its terminator; anywhere else the byte
        // would split the message in two.
        let body = payload.strip_suffix(&[END_OF_MESSAGE]).unwrap_or(payload);
        if let Some(offset) = body.iter().position(|&b| b == END_OF_MESSAGE) {
            return Err(TransportError::SentinelInPayload { offset });
        }
        out.reserve(body.len() + 1);
        out.extend_from_slice(body);
        out.push(END_OF_MESSAGE);
        Ok(())
    }

    #[inline]
    fn is_complete(&self, buf: &[u8]) -> bool {
        buf.last() == Some(&END_OF_MESSAGE)
    }

    #[inline]
    fn strip<'a>(&self, message: &'a [u8]) -> &'a [u8] {
        message.strip_suffix(&[END_OF_MESSAGE]).unwrap_or(message)
    }
}
