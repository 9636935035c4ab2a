//! Layout editor: the single mutation surface over room + scene.
//!
//! Both view projections drive the scene exclusively through this type
//! and observe it through its event bus; neither ever writes to an
//! instance directly. That one-owner rule is what keeps the 2D plan and
//! the 3D perspective rendering the same layout.

use std::sync::Arc;

use tracing::debug;

use roomplan_core::services::AssetRef;
use roomplan_core::{EventBus, SceneEvent};

use crate::catalog::FurnitureDefinition;
use crate::instance::FurnitureInstance;
use crate::placement::{self, PlacementDecision, RotationAxis};
use crate::room::RoomModel;
use crate::scene::SceneState;

/// Owns the room and scene state and routes every mutation.
pub struct LayoutEditor {
    room: RoomModel,
    scene: SceneState,
    events: Arc<EventBus>,
}

impl LayoutEditor {
    pub fn new(room: RoomModel) -> Self {
        Self {
            room,
            scene: SceneState::new(),
            events: Arc::new(EventBus::new()),
        }
    }

    /// The event bus view projections subscribe to.
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn room(&self) -> &RoomModel {
        &self.room
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Drops a catalog item into the room at the origin and selects it.
    pub fn add_furniture(&mut self, definition: &FurnitureDefinition) -> usize {
        let index = self.scene.add_from_definition(definition);
        self.events.publish(SceneEvent::FurnitureAdded { index });
        self.events
            .publish(SceneEvent::SelectionChanged { index: Some(index) });
        index
    }

    /// Proposes moving the instance at `index` to room-local `(x, z)`.
    ///
    /// The position is clamped to the room and collision-checked; on
    /// acceptance it is committed and observers are notified. On rejection
    /// the instance keeps its last accepted position.
    pub fn propose_move(&mut self, index: usize, x: f64, z: f64) -> PlacementDecision {
        if self.scene.instance(index).is_none() {
            return PlacementDecision::Rejected { blocking: index };
        }
        let decision = placement::resolve_move(&self.room, self.scene.instances(), index, x, z);
        if let PlacementDecision::Accepted { position } = decision {
            if let Some(instance) = self.scene.instance_mut(index) {
                instance.position = position;
            }
            self.events.publish(SceneEvent::FurnitureMoved { index });
        }
        decision
    }

    /// Rotates the instance at `index` by `degrees` around `axis`.
    pub fn rotate(&mut self, index: usize, axis: RotationAxis, degrees: f64) -> bool {
        let Some(instance) = self.scene.instance_mut(index) else {
            return false;
        };
        placement::apply_rotation(instance, axis, degrees);
        self.events.publish(SceneEvent::FurnitureRotated { index });
        true
    }

    /// Multiplies the instance's uniform scale (floored at the engine
    /// minimum).
    pub fn scale(&mut self, index: usize, factor: f64) -> bool {
        let Some(instance) = self.scene.instance_mut(index) else {
            return false;
        };
        placement::apply_scale(instance, factor);
        self.events.publish(SceneEvent::FurnitureScaled { index });
        true
    }

    /// Removes the instance at `index`.
    pub fn remove(&mut self, index: usize) -> bool {
        let before = self.scene.selected_index();
        if self.scene.remove(index).is_none() {
            return false;
        }
        self.events.publish(SceneEvent::FurnitureRemoved { index });
        let after = self.scene.selected_index();
        if before != after {
            self.events
                .publish(SceneEvent::SelectionChanged { index: after });
        }
        true
    }

    /// Changes the instance's active texture reference (or clears it).
    pub fn retexture(&mut self, index: usize, texture: Option<AssetRef>) -> bool {
        let Some(instance) = self.scene.instance_mut(index) else {
            return false;
        };
        instance.active_texture = texture;
        self.events
            .publish(SceneEvent::FurnitureRetextured { index });
        true
    }

    /// Selects the instance at `index`, or clears the selection.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        let before = self.scene.selected_index();
        if !self.scene.select(index) {
            return false;
        }
        if before != index {
            self.events.publish(SceneEvent::SelectionChanged { index });
        }
        true
    }

    /// Resizes the room (values clamp to the editable ranges) and re-runs
    /// the boundary clamp over every instance so shrinking cannot strand
    /// furniture outside the new walls.
    pub fn set_room_dimensions(&mut self, width: f64, length: f64, height: f64) {
        self.room.set_dimensions(width, length, height);
        placement::reclamp_all(&self.room, self.scene.instances_mut());
        self.events.publish(SceneEvent::RoomChanged);
    }

    pub fn set_wall_color(&mut self, color: roomplan_core::Color) {
        self.room.wall_color = color;
        self.events.publish(SceneEvent::RoomChanged);
    }

    pub fn set_floor_color(&mut self, color: roomplan_core::Color) {
        self.room.floor_color = color;
        self.events.publish(SceneEvent::RoomChanged);
    }

    /// Clears all placed furniture (project reset). The room keeps its
    /// dimensions and colors.
    pub fn reset(&mut self) {
        self.scene.clear();
        self.events.publish(SceneEvent::SceneReplaced);
    }

    /// Swaps in a loaded project's room and furniture, all-or-nothing.
    ///
    /// The loaded room passes back through the dimension clamp and the
    /// instances through the boundary clamp, so a record written against
    /// different bounds can never produce an out-of-range scene.
    pub fn replace_scene(&mut self, room: RoomModel, instances: Vec<FurnitureInstance>) {
        self.room = room;
        self.room
            .set_dimensions(self.room.width(), self.room.length(), self.room.height());
        self.scene.replace(instances);
        placement::reclamp_all(&self.room, self.scene.instances_mut());
        debug!(
            "Scene replaced: {} instance(s), room {:.1}x{:.1}",
            self.scene.len(),
            self.room.width(),
            self.room.length()
        );
        self.events.publish(SceneEvent::SceneReplaced);
    }
}

impl std::fmt::Debug for LayoutEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEditor")
            .field("room", &self.room)
            .field("instances", &self.scene.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomplan_core::{EventCategory, EventFilter};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn definition(id: &str, width: f64, depth: f64) -> FurnitureDefinition {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": id,
            "model_asset": format!("models/{id}.glb"),
            "dimensions": { "width": width, "height": 1.0, "depth": depth },
            "dimension_unit": "m"
        }))
        .unwrap()
    }

    #[test]
    fn test_accepted_move_commits_and_notifies() {
        let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
        let moves = Arc::new(AtomicUsize::new(0));
        let seen = moves.clone();
        editor.events().subscribe(
            EventFilter::Categories(vec![EventCategory::Furniture]),
            move |event| {
                if matches!(event, SceneEvent::FurnitureMoved { .. }) {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            },
        );

        let index = editor.add_furniture(&definition("table", 1.0, 1.0));
        assert!(editor.propose_move(index, 4.0, 5.0).is_accepted());
        assert_eq!(editor.scene().instance(index).unwrap().position.x, 4.0);
        assert_eq!(moves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rejected_move_leaves_position() {
        let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
        let a = editor.add_furniture(&definition("a", 1.0, 1.0));
        editor.propose_move(a, 2.0, 2.0);
        let b = editor.add_furniture(&definition("b", 1.0, 1.0));
        editor.propose_move(b, 6.0, 6.0);

        let decision = editor.propose_move(b, 2.4, 2.4);
        assert!(!decision.is_accepted());
        let held = editor.scene().instance(b).unwrap().position;
        assert_eq!((held.x, held.z), (6.0, 6.0));
    }

    #[test]
    fn test_move_of_invalid_index_is_rejected() {
        let mut editor = LayoutEditor::new(RoomModel::default());
        assert!(!editor.propose_move(3, 1.0, 1.0).is_accepted());
    }

    #[test]
    fn test_room_shrink_reclamps_instances() {
        let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
        let index = editor.add_furniture(&definition("table", 1.0, 1.0));
        editor.propose_move(index, 9.5, 9.5);

        editor.set_room_dimensions(5.0, 5.0, 3.0);
        let held = editor.scene().instance(index).unwrap().position;
        assert_eq!((held.x, held.z), (4.5, 4.5));
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut editor = LayoutEditor::new(RoomModel::default());
        let index = editor.add_furniture(&definition("table", 1.0, 1.0));
        assert_eq!(editor.scene().selected_index(), Some(index));

        assert!(editor.remove(index));
        assert_eq!(editor.scene().selected_index(), None);
        assert!(!editor.remove(index));
    }

    #[test]
    fn test_retexture_and_reset() {
        let mut editor = LayoutEditor::new(RoomModel::default());
        let index = editor.add_furniture(&definition("table", 1.0, 1.0));

        assert!(editor.retexture(index, Some(AssetRef::new("tex/walnut.jpg"))));
        assert_eq!(
            editor.scene().instance(index).unwrap().active_texture,
            Some(AssetRef::new("tex/walnut.jpg"))
        );
        assert!(editor.retexture(index, None));
        assert_eq!(editor.scene().instance(index).unwrap().active_texture, None);

        editor.reset();
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn test_replace_scene_reclamps_loaded_data() {
        let mut editor = LayoutEditor::new(RoomModel::default());
        let def = definition("table", 1.0, 1.0);
        let mut far_away = FurnitureInstance::from_definition(&def, 0);
        far_away.position = roomplan_core::Point3::new(50.0, 0.0, 50.0);

        editor.replace_scene(RoomModel::new(6.0, 6.0, 3.0), vec![far_away]);
        let held = editor.scene().instance(0).unwrap().position;
        assert_eq!((held.x, held.z), (5.5, 5.5));
    }
}
