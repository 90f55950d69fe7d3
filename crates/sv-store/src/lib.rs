//! `sv-store` — the incremental data store behind the dashboard.
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`reference`]   | `ReferenceTable`, `load_reference`                    |
//! | [`row`]         | `CityRef`, `FrameRow`, `EnrichedRow`                  |
//! | [`delta`]       | `Delta`, `parse_delta` (server reply → rows)          |
//! | [`layout`]      | `DataLayout` (where files live)                       |
//! | [`store`]       | `FrameStore`, `MergeOutcome`                          |
//! | [`reader`]      | `read_rows` (complete-lines-only CSV reader)          |
//! | [`error`]       | `StoreError`, `StoreResult<T>`                        |
//!
//! # Files
//!
//! ```text
//! <root>/merged.csv             every enriched row ever received, in order
//! <root>/frames/frame0000.csv   seed: every city, zero infected
//! <root>/frames/frame0001.csv   rows of the first merged delta
//! ```
//!
//! Both kinds of file share the columns
//! `name,id,lat,lon,population,infected_count,frame_date`.
//!
//! # Usage
//!
//! ```rust,ignore
//! let reference = Arc::new(load_reference(Path::new("initial.csv"))?);
//! let mut store = FrameStore::new(DataLayout::under("./data"), reference);
//! store.initialize()?;
//! match store.merge(&reply, FrameIndex::ZERO)? {
//!     MergeOutcome::NoData => {}
//!     MergeOutcome::Merged { frame, total_infected, .. } => println!("{frame}: {total_infected}"),
//! }
//! ```

pub mod delta;
pub mod error;
pub mod layout;
pub mod reader;
pub mod reference;
pub mod row;
pub mod store;


pub use delta::{Delta, parse_delta};
pub use error::{StoreError, StoreResult};
pub use layout::DataLayout;
pub use reader::read_rows;
pub use reference::{ReferenceTable, load_reference, load_reference_reader};
pub use row::{CityRef, EnrichedRow, FrameRow};
pub use store::{FrameStore, MergeOutcome};
