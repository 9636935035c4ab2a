//! Both view projections must present the same layout after any sequence
//! of edits, because each re-derives from the one scene state.

use glam::Vec3;
use roomplan_core::{EventCategory, EventFilter};
use roomplan_scene::{FurnitureDefinition, LayoutEditor, RoomModel, RotationAxis};
use roomplan_view::plan::{PlanRenderer, PlanViewport};
use roomplan_view::SceneGraph;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

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
fn test_plan_and_perspective_agree_after_edits() {
    let mut editor = LayoutEditor::new(RoomModel::new(10.0, 12.0, 3.0));
    let index = editor.add_furniture(&definition("sofa", 2.0, 1.0));
    editor.propose_move(index, 4.0, 6.0);
    editor.rotate(index, RotationAxis::Y, 90.0);
    editor.scale(index, 0.5);

    // Plan view: rect centered on the instance position.
    let viewport = PlanViewport::new(1000.0, 1200.0, editor.room());
    let rect = PlanRenderer::furniture_rect(editor.scene().instance(index).unwrap(), &viewport);
    let (expected_px, expected_py) = viewport.world_to_pixel(4.0, 6.0);
    assert!((rect.x + rect.width / 2.0 - expected_px).abs() < 1e-6);
    assert!((rect.y + rect.height / 2.0 - expected_py).abs() < 1e-6);

    // Perspective view: node transform places the placeholder's center
    // over the same floor position.
    let mut graph = SceneGraph::new();
    graph.refresh(editor.room(), editor.scene());
    let node = &graph.nodes()[0];
    let center = node.transform.transform_point3(Vec3::new(0.0, 0.0, 0.0));
    assert!((f64::from(center.x) - 4.0).abs() < 1e-4);
    assert!((f64::from(center.z) - 6.0).abs() < 1e-4);
}

#[test]
fn test_rejected_move_changes_neither_view() {
    let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
    let a = editor.add_furniture(&definition("a", 1.0, 1.0));
    editor.propose_move(a, 2.0, 2.0);
    let b = editor.add_furniture(&definition("b", 1.0, 1.0));
    editor.propose_move(b, 6.0, 6.0);

    let viewport = PlanViewport::new(1000.0, 1000.0, editor.room());
    let before_rect = PlanRenderer::furniture_rect(editor.scene().instance(b).unwrap(), &viewport);
    let mut graph = SceneGraph::new();
    graph.refresh(editor.room(), editor.scene());
    let before_transform = graph.nodes()[1].transform;

    // Overlapping proposal: rejected, nothing may move in either view.
    assert!(!editor.propose_move(b, 2.4, 2.4).is_accepted());

    let after_rect = PlanRenderer::furniture_rect(editor.scene().instance(b).unwrap(), &viewport);
    graph.refresh(editor.room(), editor.scene());
    assert_eq!(before_rect, after_rect);
    assert_eq!(before_transform, graph.nodes()[1].transform);
}

#[test]
fn test_furniture_events_reach_view_subscribers() {
    let mut editor = LayoutEditor::new(RoomModel::new(10.0, 10.0, 3.0));
    let renders = Arc::new(AtomicUsize::new(0));
    let seen = renders.clone();
    editor.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Furniture, EventCategory::Room]),
        move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        },
    );

    let index = editor.add_furniture(&definition("sofa", 2.0, 1.0));
    editor.propose_move(index, 4.0, 4.0);
    editor.set_room_dimensions(12.0, 12.0, 3.0);

    // Added + moved + room changed; the selection event is filtered out.
    assert_eq!(renders.load(Ordering::SeqCst), 3);
}
