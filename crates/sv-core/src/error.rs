//! Core error type.

use thiserror::Error;

/// Errors produced while parsing `sv-core` values from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid frame index {0:?}")]
    InvalidFrame(String),

    #[error("invalid snapshot file name {0:?}")]
    InvalidSnapshotName(String),

    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),
}

/// Shorthand result type for `sv-core`.
pub type CoreResult<T> = Result<T, CoreError>;
