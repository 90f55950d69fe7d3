//! Observer trait for whoever displays sync progress.

use sv_core::FrameIndex;
use sv_store::FrameStore;
use sv_transport::TransportError;

use crate::SyncState;

/// Callbacks invoked by [`Synchronizer::cycle`][crate::Synchronizer::cycle].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — trend printer
///
/// ```rust,ignore
/// struct TrendPrinter;
///
/// impl SyncObserver for TrendPrinter {
///     fn on_frame_merged(&mut self, state: &SyncState, _store: &FrameStore) {
///         println!("{}", state.trend());
///     }
/// }
/// ```
pub trait SyncObserver {
    /// Called before the delta request is sent.
    fn on_cycle_start(&mut self, _as_of: FrameIndex) {}

    /// Called after a new frame has been merged and the state updated.
    ///
    /// The store gives read access to the new snapshot for rendering.
    fn on_frame_merged(&mut self, _state: &SyncState, _store: &FrameStore) {}

    /// Called when the server had nothing newer than `as_of`.
    fn on_no_data(&mut self, _as_of: FrameIndex) {}

    /// Called when the exchange with the server failed.
    fn on_failure(&mut self, _error: &TransportError) {}
}

/// A [`SyncObserver`] that does nothing.
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}
