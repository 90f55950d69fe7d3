//! Plain data row types.

use serde::{Deserialize, Serialize};

use sv_core::{CityId, FrameIndex, GeoPoint};

/// Static attributes of one city, loaded once from the reference file.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRef {
    pub id:         CityId,
    pub name:       String,
    pub position:   GeoPoint,
    /// Population used for the frame-0 seed; 0 when the file has no such
    /// column.
    pub population: u64,
}

/// One dynamic measurement for a city, parsed from a server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub city_id:        CityId,
    pub population:     u64,
    pub infected_count: u64,
    /// Frame the server reports for the measurement: its date column + 1,
    /// since frame 0 is the local seed.  Stored rows are labelled with the
    /// frame being merged instead; this is only compared against it.
    pub frame_index:    FrameIndex,
}

/// A [`FrameRow`] joined with its city's [`CityRef`] attributes.
///
/// Field order is the column order of every dataset and snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub name:           String,
    pub id:             CityId,
    pub lat:            f64,
    pub lon:            f64,
    pub population:     u64,
    pub infected_count: u64,
    pub frame_date:     FrameIndex,
}

impl EnrichedRow {
    /// Join a dynamic row with its city, labelled as `frame`.
    pub fn join(city: &CityRef, row: &FrameRow, frame: FrameIndex) -> Self {
        Self {
            name:           city.name.clone(),
            id:             city.id.clone(),
            lat:            city.position.lat,
            lon:            city.position.lon,
            population:     row.population,
            infected_count: row.infected_count,
            frame_date:     frame,
        }
    }

    /// The frame-0 row for `city`: reference population, nobody infected.
    pub fn seed(city: &CityRef) -> Self {
        Self {
            name:           city.name.clone(),
            id:             city.id.clone(),
            lat:            city.position.lat,
            lon:            city.position.lon,
            population:     city.population,
            infected_count: 0,
            frame_date:     FrameIndex::ZERO,
        }
    }
}

/// Column names written as the header of every dataset and snapshot file.
pub const ENRICHED_COLUMNS: [&str; 7] =
    ["name", "id", "lat", "lon", "population", "infected_count", "frame_date"];
