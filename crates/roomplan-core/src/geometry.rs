//! Geometry primitives for the layout engine.
//!
//! Everything here is in room-local meters: `(0, 0, 0)` is one room corner,
//! `x` runs along the room width, `z` along its length, and `y` is the
//! height offset above the floor. The scene data model is `f64`; the 3D
//! view layer converts to its own math types at the boundary.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// A point or vector in room-local meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Object dimensions: width along x, height along y, depth along z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size3 {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Size3 {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

/// Axis-aligned half-extents of an object's footprint on the floor plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub half_width: f64,
    pub half_depth: f64,
}

impl Footprint {
    pub const fn new(half_width: f64, half_depth: f64) -> Self {
        Self {
            half_width,
            half_depth,
        }
    }

    /// Bounding rectangle of this footprint centered at `(x, z)`.
    pub fn rect_at(&self, x: f64, z: f64) -> Rect2 {
        Rect2 {
            min_x: x - self.half_width,
            min_z: z - self.half_depth,
            max_x: x + self.half_width,
            max_z: z + self.half_depth,
        }
    }
}

/// Axis-aligned rectangle on the floor plane (x/z axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect2 {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl Rect2 {
    pub const fn new(min_x: f64, min_z: f64, max_x: f64, max_z: f64) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Strict-inequality overlap test.
    ///
    /// Rectangles that merely touch along an edge do not overlap, so two
    /// items can sit flush against each other.
    pub fn overlaps(&self, other: &Rect2) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_z < other.max_z
            && self.max_z > other.min_z
    }

    /// Whether the point `(x, z)` lies inside this rectangle (inclusive).
    pub fn contains(&self, x: f64, z: f64) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

/// Euler rotation about the x/y/z axes, stored in radians.
///
/// Radians are the canonical unit throughout the data model; degree values
/// are converted at the operation and render boundaries that need them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerRotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerRotation {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Builds a rotation from per-axis degree values.
    pub fn from_degrees(x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        Self {
            x: x_deg.to_radians(),
            y: y_deg.to_radians(),
            z: z_deg.to_radians(),
        }
    }

    /// Normalizes every axis into `[0, 2π)`.
    pub fn wrapped(self) -> Self {
        Self {
            x: wrap_radians(self.x),
            y: wrap_radians(self.y),
            z: wrap_radians(self.z),
        }
    }

    /// Yaw (rotation about the vertical axis) in degrees, for display.
    pub fn yaw_degrees(&self) -> f64 {
        self.y.to_degrees()
    }
}

/// Wraps an angle into `[0, 2π)`.
pub fn wrap_radians(angle: f64) -> f64 {
    let wrapped = angle % TAU;
    if wrapped < 0.0 {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// An RGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Neutral light gray used when a stored color fails to parse.
    pub const NEUTRAL: Self = Self::new(0xcc, 0xcc, 0xcc);

    /// Parses `#rrggbb` (leading `#` optional), falling back to
    /// [`Color::NEUTRAL`] on anything unparseable. Stored colors come from
    /// user input and external records, so a bad value degrades instead of
    /// failing the whole document.
    pub fn from_hex_lenient(hex: &str) -> Self {
        Self::try_from_hex(hex).unwrap_or(Self::NEUTRAL)
    }

    fn try_from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#').unwrap_or_else(|| hex.trim());
        if digits.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Normalized RGB components for a render backend.
    pub fn to_rgb_f32(&self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Ok(Color::from_hex_lenient(&hex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect2::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect2::new(1.0, 1.0, 3.0, 3.0);
        let c = Rect2::new(5.0, 5.0, 6.0, 6.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect2::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect2::new(2.0, 0.0, 4.0, 2.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_footprint_rect() {
        let fp = Footprint::new(0.5, 0.3);
        let rect = fp.rect_at(2.0, 3.0);
        assert_eq!(rect, Rect2::new(1.5, 2.7, 2.5, 3.3));
        assert_eq!(rect.center(), (2.0, 3.0));
    }

    #[test]
    fn test_wrap_radians() {
        assert!((wrap_radians(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_radians(-0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert_eq!(wrap_radians(0.0), 0.0);
    }

    #[test]
    fn test_rotation_from_degrees() {
        let rot = EulerRotation::from_degrees(0.0, 90.0, 0.0);
        assert!((rot.y - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((rot.yaw_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::new(0x8b, 0x5a, 0x2b);
        assert_eq!(Color::from_hex_lenient(&color.to_hex()), color);
        assert_eq!(Color::from_hex_lenient("8b5a2b"), color);
    }

    #[test]
    fn test_color_lenient_fallback() {
        assert_eq!(Color::from_hex_lenient("not-a-color"), Color::NEUTRAL);
        assert_eq!(Color::from_hex_lenient("#12"), Color::NEUTRAL);
    }

    #[test]
    fn test_color_serde() {
        let json = serde_json::to_string(&Color::new(255, 0, 128)).unwrap();
        assert_eq!(json, "\"#ff0080\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::new(255, 0, 128));
    }
}
