//! Perspective camera and room-aware framing control.

use glam::{Mat4, Vec3};

use roomplan_core::{EventBus, Point3, SceneEvent};
use roomplan_scene::{CameraPreset, CameraState, RoomModel};
use std::sync::Arc;

fn to_vec3(p: Point3) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

fn to_point3(v: Vec3) -> Point3 {
    Point3::new(f64::from(v.x), f64::from(v.y), f64::from(v.z))
}

/// The live 3D camera.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_state(&CameraState::default())
    }
}

impl Camera {
    /// Builds a camera from persisted state.
    pub fn from_state(state: &CameraState) -> Self {
        Self {
            position: to_vec3(state.position),
            target: to_vec3(state.target),
            fov: state.field_of_view as f32,
            aspect_ratio: 16.0 / 9.0,
            near: 0.05,
            far: 200.0,
        }
    }

    /// Captures the camera into persistable state.
    pub fn to_state(&self) -> CameraState {
        CameraState {
            position: to_point3(self.position),
            target: to_point3(self.target),
            field_of_view: f64::from(self.fov),
        }
    }

    pub fn update_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Unit vector from the camera toward its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        // Looking straight up or down leaves Y degenerate as the up
        // vector; fall back to Z so the overhead preset stays valid.
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Maintains the live camera and its orbit target, and applies the
/// framing presets.
///
/// Presets are pure functions of the room (see
/// [`roomplan_scene::CameraPreset`]); applying one updates position,
/// target, and orbit target atomically so a half-applied framing can
/// never be observed.
pub struct CameraController {
    camera: Camera,
    orbit_target: Vec3,
    events: Option<Arc<EventBus>>,
}

impl CameraController {
    /// Creates a controller framed on `room` with the Reset preset.
    pub fn new(room: &RoomModel) -> Self {
        let state = CameraPreset::Reset.state_for(room);
        let camera = Camera::from_state(&state);
        let orbit_target = camera.target;
        Self {
            camera,
            orbit_target,
            events: None,
        }
    }

    /// Attaches the scene event bus so camera changes are observable.
    pub fn attach_events(&mut self, events: Arc<EventBus>) {
        self.events = Some(events);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn orbit_target(&self) -> Vec3 {
        self.orbit_target
    }

    /// Applies a framing preset for the current room.
    pub fn apply_preset(&mut self, preset: CameraPreset, room: &RoomModel) {
        let state = preset.state_for(room);
        self.camera.position = to_vec3(state.position);
        self.camera.target = to_vec3(state.target);
        self.camera.fov = state.field_of_view as f32;
        self.orbit_target = self.camera.target;
        self.notify();
    }

    /// Restores a persisted camera (project load).
    pub fn restore(&mut self, state: &CameraState) {
        let aspect = self.camera.aspect_ratio;
        self.camera = Camera::from_state(state);
        self.camera.aspect_ratio = aspect;
        self.orbit_target = self.camera.target;
        self.notify();
    }

    /// Orbits the camera around its target by yaw/pitch deltas (radians).
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let offset = self.camera.position - self.orbit_target;
        let radius = offset.length().max(0.01);
        let mut yaw = offset.z.atan2(offset.x);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        yaw += delta_yaw;
        // Keep away from the poles to avoid flipping.
        let limit = 89.0f32.to_radians();
        pitch = (pitch + delta_pitch).clamp(-limit, limit);

        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        self.camera.position = self.orbit_target
            + Vec3::new(
                radius * cos_pitch * yaw.cos(),
                radius * sin_pitch,
                radius * cos_pitch * yaw.sin(),
            );
        self.camera.target = self.orbit_target;
        self.notify();
    }

    /// Moves the camera along its view direction. Positive zooms in,
    /// stopping short of the target.
    pub fn zoom(&mut self, delta: f32) {
        let offset = self.camera.position - self.orbit_target;
        let distance = (offset.length() - delta).clamp(0.5, 100.0);
        self.camera.position = self.orbit_target + offset.normalize() * distance;
        self.notify();
    }

    fn notify(&self) {
        if let Some(events) = &self.events {
            events.publish(SceneEvent::CameraChanged);
        }
    }
}

impl std::fmt::Debug for CameraController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraController")
            .field("camera", &self.camera)
            .field("orbit_target", &self.orbit_target)
            .finish()
    }
}
