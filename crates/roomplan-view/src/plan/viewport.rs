//! Viewport and coordinate transformation for the plan canvas.
//!
//! Handles conversion between pixel coordinates (screen space) and
//! room-local meters. The room is fitted into the canvas at a fixed fill
//! factor; there is no free zoom or pan in the plan view, so the mapping
//! is a single uniform scale plus a centering offset, recomputed on
//! canvas resize or room resize.

use roomplan_scene::RoomModel;
use std::fmt;

/// Fraction of the canvas the room occupies along its tighter axis.
const FILL_FACTOR: f64 = 0.8;

/// The plan view's canvas-space transform state.
#[derive(Debug, Clone)]
pub struct PlanViewport {
    canvas_width: f64,
    canvas_height: f64,
    room_width: f64,
    room_length: f64,
    pixels_per_meter: f64,
    offset_x: f64,
    offset_y: f64,
}

impl PlanViewport {
    /// Creates a viewport fitted to `room` on a canvas of the given pixel
    /// dimensions.
    pub fn new(canvas_width: f64, canvas_height: f64, room: &RoomModel) -> Self {
        let mut viewport = Self {
            canvas_width,
            canvas_height,
            room_width: room.width(),
            room_length: room.length(),
            pixels_per_meter: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        viewport.refit();
        viewport
    }

    /// Recomputes the transform after a canvas resize.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.refit();
    }

    /// Recomputes the transform after a room resize.
    pub fn fit_room(&mut self, room: &RoomModel) {
        self.room_width = room.width();
        self.room_length = room.length();
        self.refit();
    }

    fn refit(&mut self) {
        if self.canvas_width <= 0.0
            || self.canvas_height <= 0.0
            || self.room_width <= 0.0
            || self.room_length <= 0.0
        {
            self.pixels_per_meter = 1.0;
            self.offset_x = 0.0;
            self.offset_y = 0.0;
            return;
        }
        let scale_x = self.canvas_width / self.room_width;
        let scale_y = self.canvas_height / self.room_length;
        self.pixels_per_meter = scale_x.min(scale_y) * FILL_FACTOR;
        self.offset_x = (self.canvas_width - self.room_width * self.pixels_per_meter) / 2.0;
        self.offset_y = (self.canvas_height - self.room_length * self.pixels_per_meter) / 2.0;
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// The uniform scale in pixels per meter.
    pub fn pixels_per_meter(&self) -> f64 {
        self.pixels_per_meter
    }

    /// Converts a room-local floor position to pixel coordinates.
    ///
    /// The plan is viewed from above with the room origin at the top-left
    /// of the fitted area: +x runs right, +z runs down the screen.
    pub fn world_to_pixel(&self, x: f64, z: f64) -> (f64, f64) {
        (
            self.offset_x + x * self.pixels_per_meter,
            self.offset_y + z * self.pixels_per_meter,
        )
    }

    /// Converts pixel coordinates back to room-local floor meters.
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> (f64, f64) {
        (
            (pixel_x - self.offset_x) / self.pixels_per_meter,
            (pixel_y - self.offset_y) / self.pixels_per_meter,
        )
    }

    /// Converts a pixel delta (drag movement) to a meter delta.
    pub fn pixel_delta_to_meters(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.pixels_per_meter, dy / self.pixels_per_meter)
    }
}

impl fmt::Display for PlanViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}x{:.0}px @ {:.1}px/m",
            self.canvas_width, self.canvas_height, self.pixels_per_meter
        )
    }
}
