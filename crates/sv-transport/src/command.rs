//! Commands understood by the simulation server.

use std::fmt;

use sv_core::FrameIndex;

/// Reply prefix the server uses when it has no frame newer than requested.
///
/// Matched as a prefix: some server builds append detail after it.
pub const NO_DATA_REPLY: &str = "no data";

/// Control message announcing that the client is about to disconnect.
pub const CLOSE_NOTICE: &[u8] = b"I'LL BE BACK";

/// A request sent from the dashboard to the simulation server.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Begin (or resume) the simulation.
    Start,
    /// Stop the simulation; the server exits after replying.
    Stop,
    /// Request every row strictly newer than `after`.
    SendData { after: FrameIndex },
}

impl Command {
    /// Wire payload without the end-of-message byte.
    pub fn payload(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parse a payload (terminator already stripped) back into a command.
    ///
    /// Returns `None` for anything the server would ignore.
    pub fn parse(payload: &[u8]) -> Option<Command> {
        let text = std::str::from_utf8(payload).ok()?;
        let mut words = text.split_whitespace();
        match words.next()? {
            "start" => Some(Command::Start),
            "out" => Some(Command::Stop),
            "send_data" => {
                let after = words.next()?.parse().ok()?;
                Some(Command::SendData { after })
            }
            _ => None,
        }
    }

    /// `true` if the server replies to this command.
    pub fn expects_reply(&self) -> bool {
        matches!(self, Command::SendData { .. })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => f.write_str("start"),
            Command::Stop => f.write_str("out"),
            Command::SendData { after } => write!(f, "send_data {after}"),
        }
    }
}
