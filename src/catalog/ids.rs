//! Identifier types for catalog items.
//!
//! Upstream data writes the same id as a JSON number in one place and as a
//! string in another (`"shows": [3, "5"]`). Both forms are folded into one
//! canonical string while deserializing, so the rest of the crate compares
//! ids with plain equality.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Largest integer an f64 holds exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Raw id as it appears in the JSON document
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(u64),
    Float(f64),
    Text(String),
}

impl RawId {
    fn into_canonical(self) -> String {
        match self {
            RawId::Int(n) => n.to_string(),
            RawId::Float(f) => number_text(f),
            RawId::Text(s) => canonical_text(&s),
        }
    }
}

/// Decimal form of a number: integral values lose their fraction (`3.0` -> `3`)
fn number_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Trimmed text, with numeric strings written the way the number would be
/// (`" 3 "`, `"3.0"` and `"+3"` all become `"3"`). Anything else is kept as is.
fn canonical_text(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return n.to_string();
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => {
            (n as i64).to_string()
        }
        _ => raw.to_string(),
    }
}

/// Podcast (show) identifier, kept as its canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ShowId(String);

impl ShowId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(canonical_text(raw.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ShowId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for ShowId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShowId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| ShowId(raw.into_canonical()))
    }
}

/// Genre identifier. Usually numbered upstream, but any string is accepted:
/// an id that names no genre only changes the tag label, never the load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GenreId(String);

impl GenreId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(canonical_text(raw.as_ref()))
    }

    /// Genre id for a parsed filter number
    pub fn from_number(n: f64) -> Self {
        Self(number_text(n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for GenreId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for GenreId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for GenreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for GenreId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| GenreId(raw.into_canonical()))
    }
}
