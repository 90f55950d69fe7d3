//! Keeps the map's render description current as frames arrive.

use std::collections::HashSet;

use tracing::{info, warn};

use sv_store::FrameStore;
use sv_sync::{SyncObserver, SyncState};
use sv_view::{RenderDescription, reconcile};

/// Rebuilds the render description from each new snapshot while keeping the
/// user's viewport and styling.
#[derive(Default)]
pub struct MapObserver {
    current: Option<RenderDescription>,
}

impl MapObserver {
    /// Seed the map with the frame-0 snapshot.
    pub fn with_initial(store: &FrameStore) -> Self {
        let current = match store.snapshot(store.latest_frame()) {
            Ok(rows) => Some(RenderDescription::from_rows(store.latest_frame(), &rows)),
            Err(e) => {
                warn!(error = %e, "initial snapshot unreadable; map starts empty");
                None
            }
        };
        Self { current }
    }

    pub fn current(&self) -> Option<&RenderDescription> {
        self.current.as_ref()
    }
}

impl SyncObserver for MapObserver {
    fn on_frame_merged(&mut self, state: &SyncState, store: &FrameStore) {
        let frame = state.current_frame();
        let rows = match store.snapshot(frame) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(%frame, error = %e, "snapshot unreadable; map not refreshed");
                return;
            }
        };
        let fresh = RenderDescription::from_rows(frame, &rows);
        let next = reconcile(fresh, self.current.as_ref(), &HashSet::new());
        info!(
            %frame,
            cities = next.markers.len(),
            infected = next.total_infected(),
            delta = state.delta_infected(),
            "map refreshed"
        );
        self.current = Some(next);
    }
}
