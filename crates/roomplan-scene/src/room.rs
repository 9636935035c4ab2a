//! The parametric room.

use roomplan_core::{Color, Rect2};
use serde::{Deserialize, Serialize};

/// Minimum room width/length in meters.
pub const MIN_SPAN: f64 = 3.0;
/// Maximum room width/length in meters.
pub const MAX_SPAN: f64 = 20.0;
/// Minimum room height in meters.
pub const MIN_HEIGHT: f64 = 2.0;
/// Maximum room height in meters.
pub const MAX_HEIGHT: f64 = 5.0;

/// An axis-aligned, origin-anchored rectangular room.
///
/// The floor spans `[0, width] × [0, length]` on the x/z plane; walls rise
/// to `height`. Dimensions are meters and are clamped to the editable
/// ranges on every mutation, so a `RoomModel` is always valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomModel {
    width: f64,
    length: f64,
    height: f64,
    pub wall_color: Color,
    pub floor_color: Color,
}

impl Default for RoomModel {
    fn default() -> Self {
        Self {
            width: 8.0,
            length: 10.0,
            height: 3.0,
            wall_color: Color::new(0xf2, 0xee, 0xe5),
            floor_color: Color::new(0xc9, 0xa8, 0x7c),
        }
    }
}

impl RoomModel {
    /// Creates a room with the given dimensions, clamped to the editable
    /// ranges.
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        let mut room = Self::default();
        room.set_dimensions(width, length, height);
        room
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the room dimensions, clamping each to its editable range.
    ///
    /// Returns `true` if any requested value had to be clamped.
    pub fn set_dimensions(&mut self, width: f64, length: f64, height: f64) -> bool {
        let w = width.clamp(MIN_SPAN, MAX_SPAN);
        let l = length.clamp(MIN_SPAN, MAX_SPAN);
        let h = height.clamp(MIN_HEIGHT, MAX_HEIGHT);
        let clamped = w != width || l != length || h != height;
        self.width = w;
        self.length = l;
        self.height = h;
        clamped
    }

    /// The floor rectangle in room-local meters.
    pub fn floor_bounds(&self) -> Rect2 {
        Rect2::new(0.0, 0.0, self.width, self.length)
    }

    /// Center of the floor plane.
    pub fn floor_center(&self) -> (f64, f64) {
        (self.width / 2.0, self.length / 2.0)
    }
}
