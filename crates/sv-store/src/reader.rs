//! Reader for files that may still be growing.
//!
//! The renderer reads the dataset while the synchronizer appends to it.  Only
//! complete, newline-terminated lines are parsed; a trailing partial line is
//! left for the next read.

use std::path::Path;

use crate::{EnrichedRow, StoreResult};

/// Parse every complete row of a dataset or snapshot file.
///
/// A missing trailing newline on the last line means that line is still
/// being written, so it is ignored.
pub fn read_rows(path: &Path) -> StoreResult<Vec<EnrichedRow>> {
    let bytes = std::fs::read(path)?;
    let complete = match bytes.iter().rposition(|&b| b == b'\n') {
        Some(i) => &bytes[..=i],
        None => return Ok(Vec::new()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(complete);
    reader
        .deserialize::<EnrichedRow>()
        .map(|r| r.map_err(Into::into))
        .collect()
}
