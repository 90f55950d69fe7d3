//! Reference table loader.
//!
//! # CSV format
//!
//! A header line followed by one row per city.  Columns are located by
//! header name; both the English and the Czech names are accepted:
//!
//! | Field        | Header names                    | Fallback position |
//! |--------------|---------------------------------|-------------------|
//! | name         | `name`, `nazev_obce`            | 0                 |
//! | id           | `id`, `kod_obce`                | 1                 |
//! | latitude     | `lat`, `latitude`               | 2                 |
//! | longitude    | `lon`, `longitude`              | 3                 |
//! | population   | `population`, `pocet_obyvatel`  | *(optional)*      |
//!
//! ```csv
//! nazev_obce,kod_obce,latitude,longitude,vymera,pocet_obyvatel,pocet_nakazenych,datum
//! Alpha,001,50.0,14.0,1234,1000,0,0
//! ```
//!
//! Loading stops at the first row with fewer than four fields or with an
//! unparseable value.  That row marks the end of the table; it is not an
//! error.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info, warn};

use sv_core::{CityId, GeoPoint};

use crate::{CityRef, StoreError, StoreResult};

#[cfg(feature = "fx-hash")]
type IdIndex = rustc_hash::FxHashMap<CityId, usize>;
#[cfg(not(feature = "fx-hash"))]
type IdIndex = std::collections::HashMap<CityId, usize>;

/// Minimum field count of a table row.
const MIN_FIELDS: usize = 4;

// ── ReferenceTable ────────────────────────────────────────────────────────────

/// Immutable city-id → [`CityRef`] mapping.
///
/// Cities keep their file order, which is also the order of the frame-0 seed.
/// There is no reload path; a changed reference file needs a restart.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    cities: Vec<CityRef>,
    index:  IdIndex,
}

impl ReferenceTable {
    /// Build a table from already-parsed cities.  A repeated id replaces the
    /// earlier entry in place.
    pub fn from_cities(cities: impl IntoIterator<Item = CityRef>) -> Self {
        let mut table = Self::default();
        for city in cities {
            table.insert(city);
        }
        table
    }

    fn insert(&mut self, city: CityRef) {
        match self.index.get(&city.id) {
            Some(&i) => {
                debug!(id = %city.id, "duplicate city id; keeping the later row");
                self.cities[i] = city;
            }
            None => {
                self.index.insert(city.id.clone(), self.cities.len());
                self.cities.push(city);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&CityRef> {
        self.index.get(id).map(|&i| &self.cities[i])
    }

    /// Cities in file order.
    pub fn cities(&self) -> &[CityRef] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the reference table from a CSV file.
pub fn load_reference(path: &Path) -> StoreResult<ReferenceTable> {
    let file = std::fs::File::open(path)?;
    let table = load_reference_reader(file).map_err(|e| match e {
        StoreError::MissingHeader { .. } => StoreError::MissingHeader {
            path: path.display().to_string(),
        },
        other => other,
    })?;
    info!(path = %path.display(), cities = table.len(), "reference table loaded");
    Ok(table)
}

/// Like [`load_reference`] but accepts any `Read` source.
pub fn load_reference_reader<R: Read>(reader: R) -> StoreResult<ReferenceTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = csv_reader.headers()?.clone();
    if header.iter().all(str::is_empty) {
        return Err(StoreError::MissingHeader { path: "<reader>".into() });
    }
    let columns = Columns::from_header(&header);

    let mut table = ReferenceTable::default();
    for result in csv_reader.records() {
        let record = result?;
        match columns.city(&record) {
            Some(city) => table.insert(city),
            None => {
                let line = record.position().map_or(0, |p| p.line());
                debug!(line, "end of reference table");
                break;
            }
        }
    }

    if table.is_empty() {
        warn!("reference table has no cities");
    }
    Ok(table)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Columns {
    name:       usize,
    id:         usize,
    lat:        usize,
    lon:        usize,
    population: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Self {
        let find = |aliases: &[&str]| {
            header
                .iter()
                .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
        };
        Self {
            name:       find(&["name", "nazev_obce"]).unwrap_or(0),
            id:         find(&["id", "kod_obce"]).unwrap_or(1),
            lat:        find(&["lat", "latitude"]).unwrap_or(2),
            lon:        find(&["lon", "longitude"]).unwrap_or(3),
            population: find(&["population", "pocet_obyvatel"]),
        }
    }

    /// Parse one row; `None` ends the table.
    fn city(&self, record: &StringRecord) -> Option<CityRef> {
        if record.len() < MIN_FIELDS {
            return None;
        }
        let id = record.get(self.id).filter(|s| !s.is_empty())?;
        let name = record.get(self.name)?;
        let position = GeoPoint::parse(record.get(self.lat)?, record.get(self.lon)?).ok()?;
        let population = match self.population.and_then(|i| record.get(i)) {
            None | Some("") => 0,
            Some(p) => p.parse().ok()?,
        };
        Some(CityRef {
            id: CityId::new(id),
            name: name.to_owned(),
            position,
            population,
        })
    }
}
