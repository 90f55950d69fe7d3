//! The `Synchronizer` and its request/merge cycle.

use tracing::{debug, error, info, warn};

use sv_core::FrameIndex;
use sv_store::{FrameStore, MergeOutcome};
use sv_transport::{Command, Transport, TransportError, TransportResult};

use crate::{SyncObserver, SyncResult, SyncState};

/// Result of one sync cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// A new frame was merged.
    Advanced {
        frame:          FrameIndex,
        rows:           usize,
        total_infected: u64,
        delta_infected: i64,
    },
    /// The server had nothing newer; state unchanged.
    NoData,
    /// The exchange failed; state unchanged, retry on the next trigger.
    Failed(TransportError),
}

impl CycleOutcome {
    pub fn advanced(&self) -> bool {
        matches!(self, CycleOutcome::Advanced { .. })
    }
}

/// Drives delta requests against the simulation server and merges replies
/// into the [`FrameStore`].
///
/// The transport and the store are injected at construction; the
/// synchronizer owns the only [`SyncState`].
pub struct Synchronizer<T: Transport> {
    transport: T,
    store:     FrameStore,
    state:     SyncState,
}

impl<T: Transport> Synchronizer<T> {
    /// Create a synchronizer over an already-initialized store.
    pub fn new(transport: T, store: FrameStore) -> Self {
        Self {
            transport,
            store,
            state: SyncState::new(),
        }
    }

    /// Write the frame-0 state and reset the counters.
    pub fn initialize(&mut self) -> SyncResult<()> {
        self.store.initialize()?;
        self.state = SyncState::new();
        Ok(())
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a control command (`start`, `out`) single-shot.
    pub fn send_command(&self, command: Command) -> TransportResult<()> {
        debug!(%command, "sending control command");
        self.transport.notify(&command.payload())
    }

    /// Run one request → merge → update cycle.
    ///
    /// Transport failures come back as [`CycleOutcome::Failed`]; only merge
    /// errors are returned as `Err`.  The state changes only when a frame
    /// was really appended.
    pub fn cycle<O: SyncObserver>(&mut self, observer: &mut O) -> SyncResult<CycleOutcome> {
        let as_of = self.state.current_frame();
        observer.on_cycle_start(as_of);

        let request = Command::SendData { after: as_of };
        let raw = match self.transport.request(&request.payload()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%as_of, error = %e, "sync cycle failed; retrying on next trigger");
                observer.on_failure(&e);
                return Ok(CycleOutcome::Failed(e));
            }
        };

        let merged = match self.store.merge(&raw, as_of) {
            Ok(m) => m,
            Err(e) => {
                if e.is_integrity() {
                    error!(%as_of, error = %e, "reference table and server disagree");
                } else {
                    warn!(%as_of, error = %e, "reply could not be merged");
                }
                return Err(e.into());
            }
        };

        match merged {
            MergeOutcome::NoData => {
                observer.on_no_data(as_of);
                Ok(CycleOutcome::NoData)
            }
            MergeOutcome::Merged { frame, rows, total_infected } => {
                self.state.advance(frame, total_infected);
                info!(trend = %self.state.trend(), "sync state advanced");
                observer.on_frame_merged(&self.state, &self.store);
                Ok(CycleOutcome::Advanced {
                    frame,
                    rows,
                    total_infected,
                    delta_infected: self.state.delta_infected(),
                })
            }
        }
    }
}
