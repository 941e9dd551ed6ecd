use core::str::FromStr;
use serde::{Deserialize, Serialize};

use boq_core::DomainError;

/// Unit of measurement. Display only; the engine does no unit arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    Area,
    Volume,
    Length,
    Count,
    Mass,
}

impl Unit {
    pub const ALL: [Unit; 5] = [Unit::Area, Unit::Volume, Unit::Length, Unit::Count, Unit::Mass];

    /// Symbol written into exported documents.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Area => "m2",
            Unit::Volume => "m3",
            Unit::Length => "m",
            Unit::Count => "nr",
            Unit::Mass => "t",
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            Unit::Area => "area",
            Unit::Volume => "volume",
            Unit::Length => "length",
            Unit::Count => "count",
            Unit::Mass => "mass",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "area" | "m2" | "m²" | "sqm" => Ok(Unit::Area),
            "volume" | "m3" | "m³" | "cum" => Ok(Unit::Volume),
            "length" | "m" | "lm" => Ok(Unit::Length),
            "count" | "nr" | "no" | "item" | "ea" => Ok(Unit::Count),
            "mass" | "t" | "tonne" => Ok(Unit::Mass),
            other => Err(DomainError::validation(format!(
                "unknown unit '{other}' (expected one of: area, volume, length, count, mass)"
            ))),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        value.symbol().to_string()
    }
}
