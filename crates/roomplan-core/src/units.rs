//! Unit conversion utilities
//!
//! The scene works exclusively in meters ("room-local meters"). Furniture
//! catalogs store dimensions in whatever unit the merchandiser entered, so
//! every dimension passes through here exactly once on its way into the
//! placement pipeline.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length unit used by catalog furniture dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Meters (the canonical scene unit)
    #[serde(alias = "m", alias = "meter")]
    Meters,
    /// Centimeters
    #[serde(alias = "cm", alias = "centimeter")]
    Centimeters,
    /// Inches
    #[serde(alias = "in", alias = "inch")]
    Inches,
    /// Feet
    #[serde(alias = "ft", alias = "foot")]
    Feet,
}

impl Default for Unit {
    fn default() -> Self {
        Self::Meters
    }
}

impl Unit {
    /// Multiplier taking a value in this unit to meters.
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Centimeters => 0.01,
            Self::Inches => 0.0254,
            Self::Feet => 0.3048,
        }
    }

    /// Parses a unit tag, falling back to meters for unknown or empty tags.
    ///
    /// Catalog metadata is not under the engine's control; a missing or
    /// unrecognized tag means "treat as already-canonical" rather than an
    /// error, which keeps the placement pipeline total.
    pub fn from_tag_lenient(tag: &str) -> Self {
        tag.parse().unwrap_or(Self::Meters)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meters => write!(f, "m"),
            Self::Centimeters => write!(f, "cm"),
            Self::Inches => write!(f, "in"),
            Self::Feet => write!(f, "ft"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(Self::Meters),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeters),
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Converts a stored dimension to meters.
///
/// * `value` - Dimension in `unit`
/// * `unit` - The unit the dimension was stored in
pub fn to_meters(value: f64, unit: Unit) -> f64 {
    value * unit.meters_per_unit()
}

/// Converts a scene dimension in meters back to the given display unit.
pub fn from_meters(value_m: f64, unit: Unit) -> f64 {
    value_m / unit.meters_per_unit()
}

/// Format a meter value for display in the given unit, with unit label.
///
/// * `value_m` - Value in meters
/// * `unit` - Target display unit
pub fn format_length(value_m: f64, unit: Unit) -> String {
    format!("{:.3} {}", from_meters(value_m, unit), unit)
}

/// Deserializes a unit tag leniently: unknown tags become [`Unit::Meters`].
///
/// For use on catalog-sourced fields via `#[serde(deserialize_with = ...)]`,
/// where rejecting a whole definition over a sloppy unit tag would be worse
/// than treating the dimension as already-canonical.
pub fn lenient_unit<'de, D>(deserializer: D) -> std::result::Result<Unit, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.as_deref().map(Unit::from_tag_lenient).unwrap_or_default())
}
