//! Integration tests for the layout data model: placement flows through
//! the editor and JSON round trips of everything the project record
//! persists.

use roomplan_core::Point3;
use roomplan_scene::{
    CameraPreset, CameraState, FurnitureDefinition, FurnitureInstance, LayoutEditor, RoomModel,
    RotationAxis,
};

fn definition(id: &str, width: f64, depth: f64, unit: &str) -> FurnitureDefinition {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": id,
        "model_asset": format!("models/{id}.glb"),
        "dimensions": { "width": width, "height": 80.0, "depth": depth },
        "dimension_unit": unit,
        "variants": [
            { "name": "Natural", "color_code": "#c0a080", "texture_asset": format!("tex/{id}.jpg"), "price": 100.0 }
        ]
    }))
    .unwrap()
}

#[test]
fn test_catalog_units_flow_into_placement() {
    // A 100x100 cm item in a 10x10 m room has 0.5 m half-extents.
    let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
    let index = editor.add_furniture(&definition("cm-box", 100.0, 100.0, "cm"));

    assert!(editor.propose_move(index, -5.0, 3.0).is_accepted());
    let held = editor.scene().instance(index).unwrap().position;
    assert_eq!((held.x, held.z), (0.5, 3.0));

    assert!(editor.propose_move(index, 50.0, 3.0).is_accepted());
    assert_eq!(editor.scene().instance(index).unwrap().position.x, 9.5);
}

#[test]
fn test_drag_sequence_with_rejections() {
    let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
    let a = editor.add_furniture(&definition("a", 1.0, 1.0, "m"));
    editor.propose_move(a, 2.0, 2.0);
    let b = editor.add_furniture(&definition("b", 1.0, 1.0, "m"));
    editor.propose_move(b, 6.0, 6.0);

    // A drag sweeping b across a: overlapping proposals reject, the rest
    // commit, and b ends at the last accepted position.
    let mut last_accepted = (6.0, 6.0);
    for (x, z) in [(4.0, 4.0), (2.4, 2.4), (2.0, 3.5), (1.0, 5.0)] {
        if editor.propose_move(b, x, z).is_accepted() {
            let held = editor.scene().instance(b).unwrap().position;
            last_accepted = (held.x, held.z);
        }
    }
    let held = editor.scene().instance(b).unwrap().position;
    assert_eq!((held.x, held.z), last_accepted);
    assert_eq!(last_accepted, (1.0, 5.0));
}

#[test]
fn test_transform_commands_compose() {
    let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
    let index = editor.add_furniture(&definition("table", 1.6, 0.9, "m"));

    editor.rotate(index, RotationAxis::Y, 90.0);
    editor.rotate(index, RotationAxis::Y, 90.0);
    editor.scale(index, 0.5);

    let instance = editor.scene().instance(index).unwrap();
    assert!((instance.rotation.yaw_degrees() - 180.0).abs() < 1e-9);
    assert_eq!(instance.scale, 0.5);
    // Footprint shrank with the scale.
    assert!((instance.footprint().half_width - 0.4).abs() < 1e-9);
}

#[test]
fn test_room_round_trip() {
    let room = RoomModel::new(8.0, 10.0, 3.0);
    let json = serde_json::to_string(&room).unwrap();
    assert_eq!(serde_json::from_str::<RoomModel>(&json).unwrap(), room);
}

#[test]
fn test_camera_round_trip() {
    let camera = CameraPreset::Overhead.state_for(&RoomModel::new(8.0, 10.0, 3.0));
    let json = serde_json::to_string(&camera).unwrap();
    assert_eq!(serde_json::from_str::<CameraState>(&json).unwrap(), camera);
}

#[test]
fn test_furniture_array_round_trip() {
    // Empty scene
    let empty: Vec<FurnitureInstance> = Vec::new();
    let json = serde_json::to_string(&empty).unwrap();
    assert!(serde_json::from_str::<Vec<FurnitureInstance>>(&json)
        .unwrap()
        .is_empty());

    // Single instance with a non-trivial transform
    let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
    let index = editor.add_furniture(&definition("sofa", 2.2, 0.95, "m"));
    editor.propose_move(index, 4.0, 5.0);
    editor.rotate(index, RotationAxis::Y, 90.0);
    editor.scale(index, 1.5);

    let instances = editor.scene().instances().to_vec();
    let json = serde_json::to_string(&instances).unwrap();
    let back: Vec<FurnitureInstance> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, instances);
    assert_eq!(back[0].position, Point3::new(4.0, 0.0, 5.0));
}
