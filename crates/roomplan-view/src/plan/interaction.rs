//! Pointer interaction for the plan view.
//!
//! A small state machine over pointer events: press selects (or clears
//! selection) via back-to-front hit testing, move drags the selected
//! instance by proposing positions to the layout editor, release ends the
//! drag. The controller never writes to an instance; a proposal the
//! placement engine rejects simply leaves the furniture where it was.

use tracing::debug;

use roomplan_scene::LayoutEditor;

use super::renderer::plan_footprint;
use super::viewport::PlanViewport;

#[derive(Debug, Clone, Copy)]
struct DragState {
    index: usize,
    /// Offset from the pointer's world position to the instance center,
    /// captured at press so the item does not jump under the cursor.
    grab_dx: f64,
    grab_dz: f64,
}

/// Plan-view pointer controller.
#[derive(Debug, Default)]
pub struct PlanInteraction {
    drag: Option<DragState>,
}

impl PlanInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a pointer press at pixel coordinates.
    ///
    /// Instances are tested back-to-front so the instance drawn on top
    /// (added last) wins ties. A hit selects the instance and starts a
    /// drag; a miss clears the selection.
    pub fn pointer_down(
        &mut self,
        editor: &mut LayoutEditor,
        viewport: &PlanViewport,
        pixel_x: f64,
        pixel_y: f64,
    ) -> Option<usize> {
        let (x, z) = viewport.pixel_to_world(pixel_x, pixel_y);

        let hit = editor
            .scene()
            .instances()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, instance)| {
                plan_footprint(instance)
                    .rect_at(instance.position.x, instance.position.z)
                    .contains(x, z)
            })
            .map(|(index, instance)| {
                (
                    index,
                    instance.position.x - x,
                    instance.position.z - z,
                )
            });

        match hit {
            Some((index, grab_dx, grab_dz)) => {
                editor.select(Some(index));
                self.drag = Some(DragState {
                    index,
                    grab_dx,
                    grab_dz,
                });
                debug!("Plan drag started on instance {}", index);
                Some(index)
            }
            None => {
                editor.select(None);
                self.drag = None;
                None
            }
        }
    }

    /// Handles pointer movement. Only meaningful while dragging; the
    /// proposed position goes through the placement engine and commits
    /// only if accepted.
    pub fn pointer_move(
        &mut self,
        editor: &mut LayoutEditor,
        viewport: &PlanViewport,
        pixel_x: f64,
        pixel_y: f64,
    ) {
        let Some(drag) = self.drag else {
            return;
        };
        let (x, z) = viewport.pixel_to_world(pixel_x, pixel_y);
        editor.propose_move(drag.index, x + drag.grab_dx, z + drag.grab_dz);
    }

    /// Handles pointer release, ending any drag.
    pub fn pointer_up(&mut self) {
        if self.drag.take().is_some() {
            debug!("Plan drag ended");
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomplan_scene::{FurnitureDefinition, RoomModel};

    fn definition(id: &str) -> FurnitureDefinition {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": id,
            "model_asset": format!("models/{id}.glb"),
            "dimensions": { "width": 1.0, "height": 1.0, "depth": 1.0 },
            "dimension_unit": "m"
        }))
        .unwrap()
    }

    fn setup() -> (LayoutEditor, PlanViewport) {
        let editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
        let viewport = PlanViewport::new(1000.0, 1000.0, editor.room());
        (editor, viewport)
    }

    #[test]
    fn test_press_selects_hit_instance() {
        let (mut editor, viewport) = setup();
        let index = editor.add_furniture(&definition("chair"));
        editor.propose_move(index, 5.0, 5.0);
        editor.select(None);

        let mut interaction = PlanInteraction::new();
        let (px, py) = viewport.world_to_pixel(5.0, 5.0);
        assert_eq!(interaction.pointer_down(&mut editor, &viewport, px, py), Some(index));
        assert_eq!(editor.scene().selected_index(), Some(index));
        assert!(interaction.is_dragging());
    }

    #[test]
    fn test_press_on_empty_space_clears_selection() {
        let (mut editor, viewport) = setup();
        let index = editor.add_furniture(&definition("chair"));
        editor.propose_move(index, 5.0, 5.0);

        let mut interaction = PlanInteraction::new();
        let (px, py) = viewport.world_to_pixel(9.0, 9.0);
        assert_eq!(interaction.pointer_down(&mut editor, &viewport, px, py), None);
        assert_eq!(editor.scene().selected_index(), None);
        assert!(!interaction.is_dragging());
    }

    #[test]
    fn test_topmost_instance_wins_ties() {
        let (mut editor, viewport) = setup();
        // Placement keeps footprints disjoint, but scaling after placement
        // can overlap them; where rectangles overlap, the later-added
        // (topmost) instance wins the hit.
        let a = editor.add_furniture(&definition("rug"));
        editor.propose_move(a, 2.5, 2.5);
        let b = editor.add_furniture(&definition("table"));
        editor.propose_move(b, 3.5, 2.5);
        editor.scale(b, 1.5);

        // (2.9, 2.5) is inside both a's [2,3] and b's scaled [2.75, 4.25].
        let mut interaction = PlanInteraction::new();
        let (px, py) = viewport.world_to_pixel(2.9, 2.5);
        assert_eq!(interaction.pointer_down(&mut editor, &viewport, px, py), Some(b));
    }

    #[test]
    fn test_drag_moves_through_placement_engine() {
        let (mut editor, viewport) = setup();
        let index = editor.add_furniture(&definition("chair"));
        editor.propose_move(index, 5.0, 5.0);

        let mut interaction = PlanInteraction::new();
        // Grab slightly off-center; the grab offset keeps the relative
        // position under the cursor.
        let (px, py) = viewport.world_to_pixel(5.2, 5.1);
        interaction.pointer_down(&mut editor, &viewport, px, py);

        let (px, py) = viewport.world_to_pixel(7.2, 3.1);
        interaction.pointer_move(&mut editor, &viewport, px, py);

        let held = editor.scene().instance(index).unwrap().position;
        assert!((held.x - 7.0).abs() < 1e-9);
        assert!((held.z - 3.0).abs() < 1e-9);

        interaction.pointer_up();
        assert!(!interaction.is_dragging());
    }

    #[test]
    fn test_drag_out_of_bounds_clamps() {
        let (mut editor, viewport) = setup();
        let index = editor.add_furniture(&definition("chair"));
        editor.propose_move(index, 5.0, 5.0);

        let mut interaction = PlanInteraction::new();
        let (px, py) = viewport.world_to_pixel(5.0, 5.0);
        interaction.pointer_down(&mut editor, &viewport, px, py);

        // Way past the right wall.
        let (px, py) = viewport.world_to_pixel(40.0, 5.0);
        interaction.pointer_move(&mut editor, &viewport, px, py);

        assert_eq!(editor.scene().instance(index).unwrap().position.x, 9.5);
    }

    #[test]
    fn test_move_without_drag_is_noop() {
        let (mut editor, viewport) = setup();
        let index = editor.add_furniture(&definition("chair"));
        editor.propose_move(index, 5.0, 5.0);

        let mut interaction = PlanInteraction::new();
        let (px, py) = viewport.world_to_pixel(8.0, 8.0);
        interaction.pointer_move(&mut editor, &viewport, px, py);

        assert_eq!(editor.scene().instance(index).unwrap().position.x, 5.0);
    }
}
