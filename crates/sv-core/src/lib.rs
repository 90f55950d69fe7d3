//! `sv-core` — foundational types for the spread-viz dashboard.
//!
//! This crate is a dependency of every other `sv-*` crate.  It has no `sv-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `CityId`                                              |
//! | [`frame`]   | `FrameIndex`, snapshot file naming                    |
//! | [`geo`]     | `GeoPoint`                                            |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod frame;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use frame::FrameIndex;
pub use geo::GeoPoint;
pub use ids::CityId;
