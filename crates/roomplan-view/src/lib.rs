//! # Roomplan View
//!
//! The two synchronized view projections over one scene:
//!
//! - [`plan`] — the 2D top-down editor: a pixels-per-meter viewport, a
//!   display-list renderer, and pointer interaction (hit testing and
//!   drag placement).
//! - [`perspective`] — the 3D view: perspective camera with room-aware
//!   framing presets, ray picking against the ground plane, a scene
//!   graph derived from the data model every refresh, and render
//!   quality tier detection.
//!
//! Both layers are stateless over `SceneState`: they read and propose,
//! the layout editor decides and commits.

pub mod plan;
pub mod perspective;

pub use plan::{PlanInteraction, PlanPrimitive, PlanRenderer, PlanViewport};
pub use perspective::{
    detect_tier, Camera, CameraController, DeviceCapabilities, DragSession3D, QualitySettings,
    QualityTier, Ray, SceneGraph,
};
