//! Where the dataset and snapshot files live.

use std::path::{Path, PathBuf};

use sv_core::FrameIndex;

/// File name of the cumulative dataset inside a layout root.
pub const DATASET_FILE: &str = "merged.csv";
/// Directory name of the per-frame snapshots inside a layout root.
pub const SNAPSHOT_DIR: &str = "frames";

/// Paths of the persisted artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataLayout {
    pub dataset:   PathBuf,
    pub snapshots: PathBuf,
}

impl DataLayout {
    /// The standard layout below `root`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            dataset:   root.join(DATASET_FILE),
            snapshots: root.join(SNAPSHOT_DIR),
        }
    }

    pub fn snapshot_path(&self, frame: FrameIndex) -> PathBuf {
        self.snapshots.join(frame.snapshot_file_name())
    }
}
