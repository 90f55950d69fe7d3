//! `FrameStore` — the cumulative dataset plus one snapshot per frame.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use csv::Writer;
use tracing::{debug, error, info, warn};

use sv_core::FrameIndex;

use crate::reader::read_rows;
use crate::row::ENRICHED_COLUMNS;
use crate::{DataLayout, Delta, EnrichedRow, ReferenceTable, StoreError, StoreResult, parse_delta};

/// Result of [`FrameStore::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The reply carried no rows; nothing was written.
    NoData,
    /// A new frame was appended.
    Merged {
        frame:          FrameIndex,
        rows:           usize,
        /// Sum of `infected_count` over the new frame only.
        total_infected: u64,
    },
}

/// Owns the persisted artifacts and joins incoming rows against the
/// reference table.
///
/// Single writer: only the synchronizer that owns the store appends to it.
/// The cumulative dataset is append-only and each snapshot is written once.
pub struct FrameStore {
    layout:       DataLayout,
    reference:    Arc<ReferenceTable>,
    dataset_rows: usize,
    latest:       FrameIndex,
}

impl FrameStore {
    pub fn new(layout: DataLayout, reference: Arc<ReferenceTable>) -> Self {
        Self {
            layout,
            reference,
            dataset_rows: 0,
            latest: FrameIndex::ZERO,
        }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }

    /// Rows written to the cumulative dataset so far, seed included.
    pub fn dataset_len(&self) -> usize {
        self.dataset_rows
    }

    /// Highest frame with a snapshot on disk.
    pub fn latest_frame(&self) -> FrameIndex {
        self.latest
    }

    /// Write the frame-0 state: a fresh cumulative dataset holding one seed
    /// row per city, and the identical `frame0000` snapshot.
    ///
    /// Snapshots left over from an earlier run are removed first so every
    /// frame of this run is written exactly once.
    pub fn initialize(&mut self) -> StoreResult<()> {
        if let Some(parent) = self.layout.dataset.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&self.layout.snapshots)?;
        let removed = remove_stale_snapshots(&self.layout.snapshots)?;
        if removed > 0 {
            debug!(removed, "removed snapshots from an earlier run");
        }

        let seed: Vec<EnrichedRow> = self.reference.cities().iter().map(EnrichedRow::seed).collect();

        let mut dataset = Writer::from_path(&self.layout.dataset)?;
        write_rows(&mut dataset, &seed, true)?;

        let frame0 = self.layout.snapshot_path(FrameIndex::ZERO);
        let mut snapshot = Writer::from_path(&frame0)?;
        write_rows(&mut snapshot, &seed, true)?;

        self.dataset_rows = seed.len();
        self.latest = FrameIndex::ZERO;
        info!(
            dataset = %self.layout.dataset.display(),
            cities = seed.len(),
            "frame store initialized"
        );
        Ok(())
    }

    /// Merge one server reply as the frame after `as_of`.
    ///
    /// All rows are joined before anything is written, so an unknown city
    /// aborts the whole merge and leaves every file untouched.
    pub fn merge(&mut self, raw: &[u8], as_of: FrameIndex) -> StoreResult<MergeOutcome> {
        let rows = match parse_delta(raw)? {
            Delta::NoData => {
                debug!(%as_of, "no new frame");
                return Ok(MergeOutcome::NoData);
            }
            Delta::Rows(rows) => rows,
        };

        let frame = as_of.next();
        let enriched = rows
            .iter()
            .map(|row| match self.reference.get(row.city_id.as_str()) {
                Some(city) => Ok(EnrichedRow::join(city, row, frame)),
                None => {
                    error!(id = %row.city_id, "server sent a city missing from the reference table");
                    Err(StoreError::UnknownCity { id: row.city_id.clone() })
                }
            })
            .collect::<StoreResult<Vec<_>>>()?;

        if let Some(row) = rows.iter().find(|r| r.frame_index != frame) {
            warn!(
                expected = %frame,
                got = %row.frame_index,
                "reply dates do not match the requested frame; rows stored as the requested frame"
            );
        }

        let dataset_len = fs::metadata(&self.layout.dataset)?.len();
        self.write_snapshot(frame, &enriched)?;
        if let Err(e) = self.append_dataset(&enriched) {
            // The frame did not happen: drop its snapshot and any partial append.
            error!(%frame, error = %e, "dataset append failed; rolling back frame");
            remove_quietly(&self.layout.snapshot_path(frame));
            if let Err(trunc) = truncate_to(&self.layout.dataset, dataset_len) {
                error!(len = dataset_len, error = %trunc, "could not truncate dataset after failed append");
            }
            return Err(e);
        }

        self.dataset_rows += enriched.len();
        self.latest = frame;
        let total_infected = enriched.iter().map(|r| r.infected_count).sum();
        info!(%frame, rows = enriched.len(), total_infected, "frame merged");
        Ok(MergeOutcome::Merged { frame, rows: enriched.len(), total_infected })
    }

    /// Read the cumulative dataset back (complete lines only).
    pub fn dataset(&self) -> StoreResult<Vec<EnrichedRow>> {
        read_rows(&self.layout.dataset)
    }

    /// Read the snapshot of `frame`.
    pub fn snapshot(&self, frame: FrameIndex) -> StoreResult<Vec<EnrichedRow>> {
        read_rows(&self.layout.snapshot_path(frame))
    }

    fn write_snapshot(&self, frame: FrameIndex, rows: &[EnrichedRow]) -> StoreResult<()> {
        let path = self.layout.snapshot_path(frame);
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::SnapshotExists { frame });
            }
            Err(e) => return Err(e.into()),
        };
        let mut writer = Writer::from_writer(file);
        if let Err(e) = write_rows(&mut writer, rows, true) {
            drop(writer);
            remove_quietly(&path);
            return Err(e);
        }
        Ok(())
    }

    fn append_dataset(&self, rows: &[EnrichedRow]) -> StoreResult<()> {
        let file = OpenOptions::new().append(true).open(&self.layout.dataset)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        write_rows(&mut writer, rows, false)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_rows(writer: &mut Writer<File>, rows: &[EnrichedRow], header: bool) -> StoreResult<()> {
    // An empty seed still gets its header, which serde would never emit.
    if header && rows.is_empty() {
        writer.write_record(ENRICHED_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Cut `path` back to `len` bytes.
pub(crate) fn truncate_to(path: &Path, len: u64) -> std::io::Result<()> {
    OpenOptions::new().write(true).open(path)?.set_len(len)
}

/// Remove a half-written file, logging instead of failing.
fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "could not remove partial file");
        }
    }
}

fn remove_stale_snapshots(dir: &Path) -> StoreResult<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let is_snapshot = name
            .to_str()
            .is_some_and(|n| FrameIndex::from_snapshot_file_name(n).is_ok());
        if is_snapshot && entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}
