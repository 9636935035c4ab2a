//! Ray picking and 3D drag placement.
//!
//! A pointer position unprojects through the camera into a world ray,
//! which intersects the ground plane at the dragged item's current
//! height. The intersection (minus a grab offset captured at drag start)
//! becomes the proposed position, routed through the placement engine
//! before anything commits.

use glam::{Mat4, Vec3};
use tracing::debug;

use roomplan_scene::{LayoutEditor, PlacementDecision, SceneState};

use super::camera::Camera;

/// A world-space ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Unprojects a screen pixel through the camera.
    pub fn from_screen(camera: &Camera, pixel_x: f32, pixel_y: f32, width: f32, height: f32) -> Self {
        let ndc_x = 2.0 * pixel_x / width - 1.0;
        let ndc_y = 1.0 - 2.0 * pixel_y / height;

        let inverse: Mat4 = camera.view_projection().inverse();
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        Self {
            origin: near,
            direction: (far - near).normalize(),
        }
    }

    /// Intersects the horizontal plane `y = plane_y`. Returns `None` when
    /// the ray is parallel to the plane or points away from it.
    pub fn intersect_ground(&self, plane_y: f32) -> Option<Vec3> {
        if self.direction.y.abs() < 1e-6 {
            return None;
        }
        let t = (plane_y - self.origin.y) / self.direction.y;
        if t < 0.0 {
            return None;
        }
        Some(self.origin + self.direction * t)
    }
}

/// An in-progress 3D drag of one furniture instance.
#[derive(Debug, Clone, Copy)]
pub struct DragSession3D {
    index: usize,
    /// Ground-plane height the drag is constrained to (the instance's
    /// height offset at grab time).
    plane_y: f32,
    grab_dx: f64,
    grab_dz: f64,
}

impl DragSession3D {
    /// Starts a drag of `index` from the given pointer position.
    ///
    /// Returns `None` if the index is invalid or the pick ray misses the
    /// instance's ground plane (e.g. pointing at the sky).
    pub fn begin(
        camera: &Camera,
        scene: &SceneState,
        index: usize,
        pixel_x: f32,
        pixel_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Option<Self> {
        let instance = scene.instance(index)?;
        let plane_y = instance.position.y as f32;
        let ray = Ray::from_screen(camera, pixel_x, pixel_y, viewport_width, viewport_height);
        let hit = ray.intersect_ground(plane_y)?;

        debug!("3D drag started on instance {}", index);
        Some(Self {
            index,
            plane_y,
            grab_dx: instance.position.x - f64::from(hit.x),
            grab_dz: instance.position.z - f64::from(hit.z),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advances the drag to a new pointer position, proposing the
    /// resulting placement to the editor. Returns the decision (a miss
    /// of the ground plane proposes nothing and reports a rejection).
    pub fn update(
        &self,
        editor: &mut LayoutEditor,
        camera: &Camera,
        pixel_x: f32,
        pixel_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> PlacementDecision {
        let ray = Ray::from_screen(camera, pixel_x, pixel_y, viewport_width, viewport_height);
        let Some(hit) = ray.intersect_ground(self.plane_y) else {
            return PlacementDecision::Rejected {
                blocking: self.index,
            };
        };
        editor.propose_move(
            self.index,
            f64::from(hit.x) + self.grab_dx,
            f64::from(hit.z) + self.grab_dz,
        )
    }
}
