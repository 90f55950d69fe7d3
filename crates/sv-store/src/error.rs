//! Error types for sv-store.

use thiserror::Error;

use sv_core::{CityId, FrameIndex};

/// Errors produced while loading the reference table or merging frames.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The server referenced a city the reference table does not know.
    ///
    /// This is a configuration mismatch between server and client, not a
    /// transient failure.
    #[error("city {id} is not in the reference table")]
    UnknownCity { id: CityId },

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("reply is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("reference table {path} has no header line")]
    MissingHeader { path: String },

    #[error("snapshot for frame {frame} already exists")]
    SnapshotExists { frame: FrameIndex },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    /// `true` for errors that mean server and reference table disagree.
    pub fn is_integrity(&self) -> bool {
        matches!(self, StoreError::UnknownCity { .. })
    }
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
