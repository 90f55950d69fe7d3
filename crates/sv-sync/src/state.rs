//! Process-wide synchronization counters.

use std::fmt;

use sv_core::FrameIndex;

/// What the dashboard knows about the simulation's progress.
///
/// Starts at frame 0 with zero totals.  Only [`Synchronizer`] mutates it,
/// after a merge that really appended a frame, so `current_frame` never
/// decreases and grows by exactly one per merged frame.
///
/// [`Synchronizer`]: crate::Synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncState {
    current_frame:           FrameIndex,
    previous_total_infected: u64,
    current_total_infected:  u64,
    delta_infected:          i64,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest frame fully merged locally.
    pub fn current_frame(&self) -> FrameIndex {
        self.current_frame
    }

    pub fn previous_total_infected(&self) -> u64 {
        self.previous_total_infected
    }

    pub fn current_total_infected(&self) -> u64 {
        self.current_total_infected
    }

    /// Change in total infected between the last two merged frames.
    pub fn delta_infected(&self) -> i64 {
        self.delta_infected
    }

    pub fn trend(&self) -> Trend {
        Trend {
            frame:    self.current_frame,
            previous: self.previous_total_infected,
            current:  self.current_total_infected,
            delta:    self.delta_infected,
        }
    }

    /// Record a merged frame with `total_infected` across its rows.
    pub(crate) fn advance(&mut self, frame: FrameIndex, total_infected: u64) {
        debug_assert!(frame > self.current_frame, "frame counter must increase");
        self.current_frame = frame;
        self.previous_total_infected = self.current_total_infected;
        self.current_total_infected = total_infected;
        self.delta_infected = total_infected as i64 - self.previous_total_infected as i64;
    }
}

/// Display-ready totals for the trend indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trend {
    pub frame:    FrameIndex,
    pub previous: u64,
    pub current:  u64,
    pub delta:    i64,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}: {} infected ({:+})", self.frame, self.current, self.delta)
    }
}
