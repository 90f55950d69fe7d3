//! Geographic coordinate type.
//!
//! Coordinates are `f64`: they are copied verbatim from the reference table
//! into every enriched row, and double precision keeps the written number
//! equal to the one that was read (its text form may differ, `14.4200`
//! is written as `14.42`).

use std::str::FromStr;

use crate::CoreError;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse a latitude/longitude pair from two text fields.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, CoreError> {
        Ok(Self {
            lat: parse_degrees(lat)?,
            lon: parse_degrees(lon)?,
        })
    }

    /// `true` if both components are finite and inside the WGS-84 range.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

fn parse_degrees(s: &str) -> Result<f64, CoreError> {
    f64::from_str(s.trim())
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::InvalidCoordinate(s.to_owned()))
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
