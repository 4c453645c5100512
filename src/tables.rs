//! Static lookup tables: regional yield, orientation and tilt factors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A key that has no entry in one of the fixed lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {table} \"{key}\"")]
pub struct UnknownKey {
    /// Name of the table that was searched (`"region"`, `"orientation"`, `"field"`).
    pub table: &'static str,
    /// The key that was not found.
    pub key: String,
}

impl UnknownKey {
    pub(crate) fn new(table: &'static str, key: &str) -> Self {
        Self {
            table,
            key: key.to_string(),
        }
    }
}

/// Installation region, selecting the baseline specific yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    North,
    Central,
    South,
}

impl Region {
    /// All regions in table order.
    pub const ALL: [Region; 3] = [Region::North, Region::Central, Region::South];

    /// Baseline annual yield in kWh per kWp per year.
    pub fn yield_kwh_per_kwp(self) -> f64 {
        match self {
            Region::North => 900.0,
            Region::Central => 1000.0,
            Region::South => 1100.0,
        }
    }

    /// Canonical lowercase key used in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            Region::North => "north",
            Region::Central => "central",
            Region::South => "south",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = UnknownKey;

    /// Accepts the canonical key in any case as well as the German
    /// selector labels (`Norddeutschland`, `Mitteldeutschland`, `Süddeutschland`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "norddeutschland" => Ok(Region::North),
            "central" | "mitteldeutschland" => Ok(Region::Central),
            "south" | "süddeutschland" => Ok(Region::South),
            _ => Err(UnknownKey::new("region", s)),
        }
    }
}

/// Compass heading of a roof segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    South,
    EastWest,
    North,
}

impl Orientation {
    /// All orientations in table order.
    pub const ALL: [Orientation; 3] = [Orientation::South, Orientation::EastWest, Orientation::North];

    /// Multiplicative yield factor relative to a south-facing roof.
    pub fn factor(self) -> f64 {
        match self {
            Orientation::South => 1.0,
            Orientation::EastWest => 0.9,
            Orientation::North => 0.7,
        }
    }

    /// Canonical snake_case key used in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            Orientation::South => "south",
            Orientation::EastWest => "east_west",
            Orientation::North => "north",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Orientation {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "south" | "süd" => Ok(Orientation::South),
            "east_west" | "eastwest" | "east/west" | "ost/west" => Ok(Orientation::EastWest),
            "north" | "nord" => Ok(Orientation::North),
            _ => Err(UnknownKey::new("orientation", s)),
        }
    }
}

/// Looks up the baseline yield (kWh/kWp/yr) for a region by name.
///
/// # Errors
///
/// Returns [`UnknownKey`] if `region` is not one of the table keys.
pub fn region_yield(region: &str) -> Result<f64, UnknownKey> {
    region.parse::<Region>().map(Region::yield_kwh_per_kwp)
}

/// Looks up the orientation factor by name.
///
/// # Errors
///
/// Returns [`UnknownKey`] if `orientation` is not one of the table keys.
pub fn orientation_factor(orientation: &str) -> Result<f64, UnknownKey> {
    orientation.parse::<Orientation>().map(Orientation::factor)
}

/// Yield multiplier for a panel tilt in degrees.
///
/// Steep or flat panels (below 10° or above 60°) get 0.9, the optimal band
/// 20°..=40° gets 1.0, and the remaining shoulders get 0.95. No interpolation.
pub fn tilt_factor(tilt_deg: f64) -> f64 {
    if !(10.0..=60.0).contains(&tilt_deg) {
        return 0.9;
    }
    if (20.0..=40.0).contains(&tilt_deg) {
        return 1.0;
    }
    0.95
}
