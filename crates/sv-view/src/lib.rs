//! `sv-view` — what the map renderer consumes, and how view state survives a
//! data refresh.
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`render`]     | `RenderDescription`, `Viewport`, `LayerStyle`, `MapMarker` |
//! | [`reconcile`]  | `ViewField`, `reconcile`                                |
//!
//! A `RenderDescription` splits into data-bearing fields (frame and markers,
//! always taken from the fresh description) and view fields (viewport,
//! frame slider, layer styling) which [`reconcile`] carries over from the
//! description the user was looking at.

pub mod reconcile;
pub mod render;

#[cfg(test)]
mod tests;

pub use reconcile::{UnknownViewField, ViewField, reconcile};
pub use render::{LayerStyle, MapMarker, RenderDescription, Viewport};
