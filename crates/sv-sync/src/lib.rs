//! `sv-sync` — keeps the local frame store in step with the simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`state`]     | `SyncState`, `Trend`                                      |
//! | [`sync`]      | `Synchronizer`, `CycleOutcome`                            |
//! | [`poll`]      | `PollConfig`, `PollSchedule` (adaptive polling interval)  |
//! | [`observer`]  | `SyncObserver` trait, `NoopObserver`                      |
//! | [`error`]     | `SyncError`, `SyncResult<T>`                              |
//!
//! # Cycle (summary)
//!
//! ```text
//! Idle ──trigger──▶ Requesting ──reply──▶ Merging ──ok──▶ Idle (state updated)
//!                        │                   │
//!                        └──transport err────┴──▶ Idle (state untouched)
//! ```
//!
//! One cycle runs to completion before the next is started; the exclusive
//! `&mut` borrow taken by [`Synchronizer::cycle`] makes overlapping cycles on
//! one synchronizer impossible.

pub mod error;
pub mod observer;
pub mod poll;
pub mod state;
pub mod sync;


pub use error::{SyncError, SyncResult};
pub use observer::{NoopObserver, SyncObserver};
pub use poll::{PollConfig, PollSchedule};
pub use state::{SyncState, Trend};
pub use sync::{CycleOutcome, Synchronizer};
