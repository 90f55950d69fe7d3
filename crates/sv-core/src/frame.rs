//! Animation frame model.
//!
//! # Design
//!
//! A frame is one discrete simulation step, identified by a monotonically
//! increasing `FrameIndex`.  Frame 0 is the client-side seed built from the
//! reference table; every merged server delta adds exactly one frame.
//!
//! Each frame is persisted as its own snapshot file, named by a zero-padded
//! index:
//!
//! ```text
//! frame0000.csv   ← seed
//! frame0001.csv   ← first delta
//! frame0002.csv
//! ```
//!
//! Indices above 9999 simply widen the number; the prefix and suffix stay.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Prefix of every snapshot file name.
pub const SNAPSHOT_PREFIX: &str = "frame";
/// Extension (with dot) of every snapshot file name.
pub const SNAPSHOT_SUFFIX: &str = ".csv";
/// Minimum digit count of the index inside a snapshot file name.
pub const SNAPSHOT_INDEX_WIDTH: usize = 4;

// ── FrameIndex ────────────────────────────────────────────────────────────────

/// An absolute animation frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    pub const ZERO: FrameIndex = FrameIndex(0);

    /// The frame immediately after `self`.
    #[inline]
    pub fn next(self) -> FrameIndex {
        FrameIndex(self.0 + 1)
    }

    /// Snapshot file name for this frame, e.g. `frame0007.csv`.
    pub fn snapshot_file_name(self) -> String {
        format!(
            "{SNAPSHOT_PREFIX}{:0width$}{SNAPSHOT_SUFFIX}",
            self.0,
            width = SNAPSHOT_INDEX_WIDTH
        )
    }

    /// Inverse of [`snapshot_file_name`][Self::snapshot_file_name].
    pub fn from_snapshot_file_name(name: &str) -> Result<FrameIndex, CoreError> {
        let digits = name
            .strip_prefix(SNAPSHOT_PREFIX)
            .and_then(|rest| rest.strip_suffix(SNAPSHOT_SUFFIX))
            .filter(|d| d.len() >= SNAPSHOT_INDEX_WIDTH && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| CoreError::InvalidSnapshotName(name.to_owned()))?;
        digits
            .parse::<u32>()
            .map(FrameIndex)
            .map_err(|_| CoreError::InvalidSnapshotName(name.to_owned()))
    }
}

impl std::ops::Add<u32> for FrameIndex {
    type Output = FrameIndex;
    #[inline]
    fn add(self, rhs: u32) -> FrameIndex {
        FrameIndex(self.0 + rhs)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FrameIndex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(FrameIndex)
            .map_err(|_| CoreError::InvalidFrame(s.to_owned()))
    }
}
