//! City identifiers.
//!
//! City codes are kept as text: the reference file and the simulation both
//! use fixed codes where leading zeros are significant (`"001"` and `"1"`
//! name different cities), so no numeric conversion is ever applied.

use std::borrow::Borrow;
use std::fmt;

/// Identifier of a city in the reference table.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CityId(String);

impl CityId {
    /// Wrap `code`, trimming surrounding whitespace.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_owned())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CityId {
    fn from(s: String) -> Self {
        if s.trim().len() == s.len() { Self(s) } else { Self::new(s) }
    }
}

impl Borrow<str> for CityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
