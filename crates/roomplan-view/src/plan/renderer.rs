//! Plan display-list renderer.
//!
//! Produces an ordered list of backend-neutral primitives from the room
//! and scene: floor, wall border, 1-meter grid, then one rectangle per
//! furniture instance in scene order (which is the plan's z-order). A
//! drawing backend consumes the list directly or as lyon paths.

use lyon::math::{point, Box2D};
use lyon::path::{Path, Winding};

use roomplan_core::{Color, Footprint};
use roomplan_scene::{FurnitureInstance, RoomModel, SceneState};

use super::viewport::PlanViewport;

/// Tolerance around a right angle for the rotated-footprint swap, in
/// radians (about one degree).
const RIGHT_ANGLE_EPSILON: f64 = 0.018;

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// One drawing command of the plan display list, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanPrimitive {
    /// The room floor.
    Floor { rect: PixelRect, color: Color },
    /// The wall border stroked around the floor.
    WallBorder { rect: PixelRect, color: Color },
    /// One 1-meter grid line across the floor.
    GridLine { from: (f64, f64), to: (f64, f64) },
    /// A furniture instance's footprint rectangle.
    Furniture {
        index: usize,
        rect: PixelRect,
        /// Yaw in radians, for backends that render the outline rotated.
        yaw: f64,
        selected: bool,
    },
}

/// The footprint an instance presents in the plan view.
///
/// Width and depth swap when the yaw sits at a right angle (within
/// tolerance); intermediate angles keep the unrotated footprint. This
/// right-angle-only rotation awareness is a deliberate editor
/// simplification, matched by hit testing so what is drawn is what is
/// picked.
pub fn plan_footprint(instance: &FurnitureInstance) -> Footprint {
    let footprint = instance.footprint();
    let yaw = instance.rotation.wrapped().y;
    let quarter = (yaw / std::f64::consts::FRAC_PI_2).round() as i64;
    let at_right_angle = (yaw - quarter as f64 * std::f64::consts::FRAC_PI_2).abs()
        < RIGHT_ANGLE_EPSILON;
    if at_right_angle && quarter % 2 != 0 {
        Footprint::new(footprint.half_depth, footprint.half_width)
    } else {
        footprint
    }
}

/// Stateless renderer over (room, scene, viewport).
#[derive(Debug, Default)]
pub struct PlanRenderer;

impl PlanRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Builds the display list for one frame.
    pub fn render(
        &self,
        room: &RoomModel,
        scene: &SceneState,
        viewport: &PlanViewport,
    ) -> Vec<PlanPrimitive> {
        let mut list = Vec::with_capacity(scene.len() + 24);

        let floor = Self::room_rect(room, viewport);
        list.push(PlanPrimitive::Floor {
            rect: floor,
            color: room.floor_color,
        });
        list.push(PlanPrimitive::WallBorder {
            rect: floor,
            color: room.wall_color,
        });

        // Interior 1-meter grid; the border itself is the wall line.
        let mut x = 1.0;
        while x < room.width() {
            list.push(PlanPrimitive::GridLine {
                from: viewport.world_to_pixel(x, 0.0),
                to: viewport.world_to_pixel(x, room.length()),
            });
            x += 1.0;
        }
        let mut z = 1.0;
        while z < room.length() {
            list.push(PlanPrimitive::GridLine {
                from: viewport.world_to_pixel(0.0, z),
                to: viewport.world_to_pixel(room.width(), z),
            });
            z += 1.0;
        }

        let selected = scene.selected_index();
        for (index, instance) in scene.instances().iter().enumerate() {
            list.push(PlanPrimitive::Furniture {
                index,
                rect: Self::furniture_rect(instance, viewport),
                yaw: instance.rotation.wrapped().y,
                selected: selected == Some(index),
            });
        }

        list
    }

    /// The pixel rectangle an instance occupies in the plan.
    pub fn furniture_rect(instance: &FurnitureInstance, viewport: &PlanViewport) -> PixelRect {
        let footprint = plan_footprint(instance);
        let rect = footprint.rect_at(instance.position.x, instance.position.z);
        let (x0, y0) = viewport.world_to_pixel(rect.min_x, rect.min_z);
        let (x1, y1) = viewport.world_to_pixel(rect.max_x, rect.max_z);
        PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    fn room_rect(room: &RoomModel, viewport: &PlanViewport) -> PixelRect {
        let (x0, y0) = viewport.world_to_pixel(0.0, 0.0);
        let (x1, y1) = viewport.world_to_pixel(room.width(), room.length());
        PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Flattens a display list into a single lyon path (rectangle and
    /// line outlines), for backends that draw paths rather than
    /// primitives.
    pub fn to_path(primitives: &[PlanPrimitive]) -> Path {
        let mut builder = Path::builder();
        for primitive in primitives {
            match primitive {
                PlanPrimitive::Floor { rect, .. }
                | PlanPrimitive::WallBorder { rect, .. }
                | PlanPrimitive::Furniture { rect, .. } => {
                    builder.add_rectangle(
                        &Box2D::new(
                            point(rect.x as f32, rect.y as f32),
                            point((rect.x + rect.width) as f32, (rect.y + rect.height) as f32),
                        ),
                        Winding::Positive,
                    );
                }
                PlanPrimitive::GridLine { from, to } => {
                    builder.begin(point(from.0 as f32, from.1 as f32));
                    builder.line_to(point(to.0 as f32, to.1 as f32));
                    builder.end(false);
                }
            }
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomplan_scene::{FurnitureDefinition, LayoutEditor, RotationAxis};

    fn definition(width: f64, depth: f64) -> FurnitureDefinition {
        serde_json::from_value(serde_json::json!({
            "id": "unit",
            "name": "Unit",
            "model_asset": "models/unit.glb",
            "dimensions": { "width": width, "height": 1.0, "depth": depth },
            "dimension_unit": "m"
        }))
        .unwrap()
    }

    #[test]
    fn test_grid_line_count() {
        let room = RoomModel::new(8.0, 10.0, 3.0);
        let viewport = PlanViewport::new(1000.0, 1000.0, &room);
        let list = PlanRenderer::new().render(&room, &SceneState::new(), &viewport);

        let grid_lines = list
            .iter()
            .filter(|p| matches!(p, PlanPrimitive::GridLine { .. }))
            .count();
        // Interior lines only: 7 vertical (x = 1..7) + 9 horizontal (z = 1..9).
        assert_eq!(grid_lines, 16);
    }

    #[test]
    fn test_furniture_rect_at_right_angle_swaps() {
        let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
        let index = editor.add_furniture(&definition(2.0, 1.0));
        editor.propose_move(index, 5.0, 5.0);

        let viewport = PlanViewport::new(1000.0, 1000.0, editor.room());
        let upright = PlanRenderer::furniture_rect(editor.scene().instance(index).unwrap(), &viewport);
        assert!(upright.width > upright.height);

        editor.rotate(index, RotationAxis::Y, 90.0);
        let turned = PlanRenderer::furniture_rect(editor.scene().instance(index).unwrap(), &viewport);
        assert!(turned.height > turned.width);
        assert!((turned.width - upright.height).abs() < 1e-9);

        // A non-right angle keeps the unrotated footprint.
        editor.rotate(index, RotationAxis::Y, 45.0);
        let oblique = PlanRenderer::furniture_rect(editor.scene().instance(index).unwrap(), &viewport);
        assert!((oblique.width - upright.width).abs() < 1e-9);
    }

    #[test]
    fn test_display_list_order_and_selection() {
        let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
        let a = editor.add_furniture(&definition(1.0, 1.0));
        editor.propose_move(a, 2.0, 2.0);
        let b = editor.add_furniture(&definition(1.0, 1.0));
        editor.propose_move(b, 6.0, 6.0);

        let viewport = PlanViewport::new(1000.0, 1000.0, editor.room());
        let list = PlanRenderer::new().render(editor.room(), editor.scene(), &viewport);

        assert!(matches!(list[0], PlanPrimitive::Floor { .. }));
        assert!(matches!(list[1], PlanPrimitive::WallBorder { .. }));

        let furniture: Vec<_> = list
            .iter()
            .filter_map(|p| match p {
                PlanPrimitive::Furniture {
                    index, selected, ..
                } => Some((*index, *selected)),
                _ => None,
            })
            .collect();
        // Scene order, last added selected.
        assert_eq!(furniture, vec![(0, false), (1, true)]);
    }

    #[test]
    fn test_to_path_is_nonempty() {
        let room = RoomModel::new(8.0, 10.0, 3.0);
        let viewport = PlanViewport::new(800.0, 600.0, &room);
        let list = PlanRenderer::new().render(&room, &SceneState::new(), &viewport);
        let path = PlanRenderer::to_path(&list);
        assert!(path.iter().next().is_some());
    }
}
